use std::net::SocketAddr;

use bytes::Bytes;
use http::{HeaderValue, Method, Request, StatusCode};
use tracing::{debug, error};

use super::responses::{send_404, send_405_with_allow, send_500, send_response, ProxyResponse};
use crate::ProxyState;

/// Cache counters as JSON. Loopback clients only; GET/HEAD only.
pub(crate) fn serve_cache_stats<B>(
    req: &Request<B>,
    client_addr: SocketAddr,
    state: &ProxyState,
) -> ProxyResponse {
    if !client_addr.ip().is_loopback() {
        debug!(
            target: "stash::worker",
            %client_addr,
            "Cache stats requested from non-loopback client; returning 404"
        );
        return send_404();
    }

    if req.method() != Method::GET && req.method() != Method::HEAD {
        return send_405_with_allow("GET, HEAD");
    }

    let snapshot = state.store().stats();
    let body = match serde_json::to_vec(&snapshot) {
        Ok(body) => body,
        Err(e) => {
            error!(target: "stash::worker", error = ?e, "Failed to serialize cache stats");
            return send_500();
        }
    };

    let body = if req.method() == Method::HEAD {
        Bytes::new()
    } else {
        Bytes::from(body)
    };

    send_response(
        StatusCode::OK,
        HeaderValue::from_static("application/json"),
        body,
    )
}
