//! Outbound HTTP(S) client used on cache misses.

use bytes::Bytes;
use http::{header, Request, StatusCode, Uri};
use http_body_util::{BodyExt, Empty};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use crate::FetchError;

const USER_AGENT: &str = "stash/0.1.0";

pub(crate) type OriginClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// Pooled client accepting both `http://` and `https://` origins.
pub(crate) fn build_client() -> OriginClient {
    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();

    Client::builder(TokioExecutor::new()).build(https)
}

/// Response as seen by the pipeline. `body` is only read for 2xx statuses.
pub(crate) struct OriginResponse {
    pub(crate) status: StatusCode,
    pub(crate) content_type: Option<String>,
    pub(crate) body: Option<Bytes>,
}

/// Sends `GET uri` and buffers the full body of a successful response.
///
/// Dropping the returned future aborts the request and closes its connection.
pub(crate) async fn fetch(client: &OriginClient, uri: Uri) -> Result<OriginResponse, FetchError> {
    let req = Request::get(uri)
        .header(header::USER_AGENT, USER_AGENT)
        .body(Empty::<Bytes>::new())
        .map_err(FetchError::transport)?;

    let res = client.request(req).await.map_err(FetchError::transport)?;
    let status = res.status();

    if !status.is_success() {
        return Ok(OriginResponse {
            status,
            content_type: None,
            body: None,
        });
    }

    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let body = res
        .into_body()
        .collect()
        .await
        .map_err(FetchError::transport)?
        .to_bytes();

    debug!(
        target: "stash::fetch",
        status = status.as_u16(),
        bytes = body.len(),
        "Read full origin response body"
    );

    Ok(OriginResponse {
        status,
        content_type,
        body: Some(body),
    })
}
