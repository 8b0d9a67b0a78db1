//! Canned and pipeline-derived responses.

use bytes::Bytes;
use http::{header, HeaderValue, Response, StatusCode};
use http_body_util::Full;
use stash_fetch::FetchResult;

pub(crate) type ProxyResponse = Response<Full<Bytes>>;

pub(crate) const X_CACHE_STATUS: &str = "x-cache-status";
const SERVER_NAME: &str = "stash/0.1.0";
const DEFAULT_CONTENT_TYPE: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Generic helper: status + content type + body, plus the `Server` header.
pub(crate) fn send_response(
    status: StatusCode,
    content_type: HeaderValue,
    body: Bytes,
) -> ProxyResponse {
    let mut res = Response::new(Full::new(body));
    *res.status_mut() = status;
    let headers = res.headers_mut();
    headers.insert(header::SERVER, HeaderValue::from_static(SERVER_NAME));
    headers.insert(header::CONTENT_TYPE, content_type);
    res
}

fn send_text_response(status: StatusCode, body: &'static str) -> ProxyResponse {
    send_response(
        status,
        HeaderValue::from_static(TEXT_PLAIN),
        Bytes::from_static(body.as_bytes()),
    )
}

pub(crate) fn send_204() -> ProxyResponse {
    let mut res = Response::new(Full::new(Bytes::new()));
    *res.status_mut() = StatusCode::NO_CONTENT;
    res.headers_mut()
        .insert(header::SERVER, HeaderValue::from_static(SERVER_NAME));
    res
}

pub(crate) fn send_404() -> ProxyResponse {
    send_text_response(StatusCode::NOT_FOUND, "404 Not Found\n")
}

pub(crate) fn send_405() -> ProxyResponse {
    send_text_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

pub(crate) fn send_405_with_allow(allow: &'static str) -> ProxyResponse {
    let mut res = send_405();
    res.headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    res
}

pub(crate) fn send_500() -> ProxyResponse {
    send_text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error\n")
}

/// Turns a pipeline result into the client response.
///
/// - status: result status
/// - `X-Cache-Status`: HIT / MISS
/// - `Content-Type`: origin value, `application/json` when absent
/// - body: origin body, or "Error fetching data" when there is none
pub(crate) fn from_fetch_result(result: FetchResult) -> ProxyResponse {
    let content_type = result
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    let body = result
        .body
        .unwrap_or_else(|| Bytes::from_static(b"Error fetching data"));

    let mut res = send_response(result.status, content_type, body);
    res.headers_mut().insert(
        X_CACHE_STATUS,
        HeaderValue::from_static(if result.cache_hit { "HIT" } else { "MISS" }),
    );
    res
}
