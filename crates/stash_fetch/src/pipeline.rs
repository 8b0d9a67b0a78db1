use std::sync::Arc;

use stash_cache::{CacheKey, CachePolicy, CacheStore};
use tokio::time::{timeout, Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::client::{self, OriginClient};
use crate::{FetchError, FetchResult, Origin};

pub const DEFAULT_ORIGIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Cache-or-origin resolution for a single GET.
///
/// The pipeline owns no per-request state; the only thing shared between
/// concurrent `resolve` calls is the injected [`CacheStore`]. Concurrent
/// misses for the same key each go to the origin (no coalescing).
pub struct FetchPipeline {
    client: OriginClient,
    store: Arc<CacheStore>,
    timeout: Duration,
}

impl FetchPipeline {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self::with_timeout(store, DEFAULT_ORIGIN_TIMEOUT)
    }

    pub fn with_timeout(store: Arc<CacheStore>, timeout: Duration) -> Self {
        Self {
            client: client::build_client(),
            store,
            timeout,
        }
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    /// Answers `key` from the cache, or fetches `origin + key`.
    ///
    /// Flow:
    /// - cache hit => stored body/content type/status, `cache_hit = true`
    /// - timeout => 504, transport failure => 500
    /// - non-2xx => origin status passed through, nothing cached
    /// - 2xx => full body buffered, stored, then returned
    ///
    /// The whole exchange (head + body) runs under the timeout, and the
    /// cache write happens only after it completed in time. A response that
    /// shows up after the deadline is dropped along with its connection.
    #[instrument(skip_all, fields(origin = %origin, cache_key = %key))]
    pub async fn resolve(&self, origin: &Origin, key: &CacheKey) -> FetchResult {
        let start = Instant::now();

        if let Some(entry) = self.store.get(key) {
            debug!(target: "stash::fetch", "Retrieved response from cache");
            return FetchResult::hit(entry, start.elapsed());
        }

        let uri = match origin.join(key) {
            Ok(uri) => uri,
            Err(e) => return self.failure(key, e, start),
        };

        info!(target: "stash::fetch", upstream = %uri, "Forwarding request to origin");

        let response = match timeout(self.timeout, client::fetch(&self.client, uri)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return self.failure(key, e, start),
            Err(_) => return self.failure(key, FetchError::Timeout(self.timeout), start),
        };

        let Some(body) = response.body else {
            warn!(
                target: "stash::fetch",
                status = response.status.as_u16(),
                "Origin answered with a non-success status; not caching"
            );
            return FetchResult::failed(response.status, start.elapsed());
        };

        if CachePolicy::is_cacheable_status(response.status) {
            self.store.insert_response(
                key.clone(),
                body.clone(),
                response.content_type.clone(),
                response.status,
            );
        }

        FetchResult::fetched(body, response.content_type, response.status, start.elapsed())
    }

    fn failure(&self, key: &CacheKey, err: FetchError, start: Instant) -> FetchResult {
        let elapsed = start.elapsed();
        error!(
            target: "stash::fetch",
            cache_key = %key,
            elapsed_ms = elapsed.as_millis() as u64,
            error = %err,
            "Fetch error"
        );
        FetchResult::failed(err.status(), elapsed)
    }
}
