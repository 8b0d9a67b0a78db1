use bytes::Bytes;
use http::StatusCode;
use tokio::time::{Duration, Instant};

use crate::key::CacheKey;

#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub body: Bytes,
    pub content_type: Option<String>,
    pub status: StatusCode,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    /// New entry stamped with the current time.
    pub fn new(
        key: CacheKey,
        body: Bytes,
        content_type: Option<String>,
        status: StatusCode,
        ttl: Duration,
    ) -> Self {
        Self {
            key,
            body,
            content_type,
            status,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Valid while `now - created_at <= ttl`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) > self.ttl
    }
}
