use std::time::Duration;

use bytes::Bytes;
use http::StatusCode;
use stash_cache::CacheEntry;

/// Outcome of resolving one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// `None` when the origin failed or answered with a non-2xx status.
    pub body: Option<Bytes>,
    pub content_type: Option<String>,
    pub status: StatusCode,
    /// Time since `resolve` was invoked, on both hit and miss paths.
    pub elapsed: Duration,
    pub cache_hit: bool,
}

impl FetchResult {
    pub(crate) fn hit(entry: CacheEntry, elapsed: Duration) -> Self {
        Self {
            body: Some(entry.body),
            content_type: entry.content_type,
            status: entry.status,
            elapsed,
            cache_hit: true,
        }
    }

    pub(crate) fn fetched(
        body: Bytes,
        content_type: Option<String>,
        status: StatusCode,
        elapsed: Duration,
    ) -> Self {
        Self {
            body: Some(body),
            content_type,
            status,
            elapsed,
            cache_hit: false,
        }
    }

    pub(crate) fn failed(status: StatusCode, elapsed: Duration) -> Self {
        Self {
            body: None,
            content_type: None,
            status,
            elapsed,
            cache_hit: false,
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// Value for the `X-Cache-Status` header.
    pub fn cache_status(&self) -> &'static str {
        if self.cache_hit { "HIT" } else { "MISS" }
    }
}
