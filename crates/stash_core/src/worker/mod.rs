//! Per-connection HTTP/1 handler.
//!
//! Each accepted connection is served by hyper on its own task; every
//! request on it is answered by [`handle_request`].

use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use anyhow::Context;
use http::Request;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use stash_cache::{CacheKey, CachePolicy};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, instrument, warn};

use crate::ProxyState;

mod responses;
mod stats;

use responses::{from_fetch_result, send_204, send_405, ProxyResponse};
use stats::serve_cache_stats;

const FAVICON_PATH: &str = "/favicon.ico";

/// Serves one client connection until it closes.
#[instrument(skip(stream, state), fields(client = %client_addr))]
pub async fn serve_connection<S>(
    stream: S,
    client_addr: SocketAddr,
    state: Arc<ProxyState>,
) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    debug!(target: "stash::worker", "Handling new client connection");

    let io = TokioIo::new(stream);
    let service = service_fn(move |req: Request<Incoming>| {
        let state = state.clone();
        async move { Ok::<_, Infallible>(handle_request(req, client_addr, state).await) }
    });

    http1::Builder::new()
        .keep_alive(true)
        .serve_connection(io, service)
        .await
        .context("HTTP/1 connection error")?;

    debug!(target: "stash::worker", "Finished handling connection");
    Ok(())
}

/// Answers a single request.
///
/// Order:
/// 1) `/favicon.ico` => 204
/// 2) stats path => cache counters (loopback only)
/// 3) anything but GET => 405
/// 4) GET => cache or origin via the fetch pipeline
pub async fn handle_request<B>(
    req: Request<B>,
    client_addr: SocketAddr,
    state: Arc<ProxyState>,
) -> ProxyResponse {
    let path = req.uri().path();

    if path == FAVICON_PATH {
        return send_204();
    }

    if path == state.stats_path() {
        return serve_cache_stats(&req, client_addr, &state);
    }

    if !CachePolicy::is_cacheable(req.method()) {
        warn!(
            target: "stash::worker",
            method = %req.method(),
            %path,
            "Unsupported method; returning 405"
        );
        return send_405();
    }

    let key = CacheKey::from_parts(path, req.uri().query());
    let result = state.pipeline().resolve(state.origin(), &key).await;

    info!(
        target: "stash::worker",
        cache_key = %key,
        elapsed_ms = result.elapsed_ms() as u64,
        status = result.status.as_u16(),
        cache = result.cache_status(),
        "Request took {}ms / STATUS {} / X-Cache: {}",
        result.elapsed_ms(),
        result.status.as_u16(),
        result.cache_status()
    );

    from_fetch_result(result)
}
