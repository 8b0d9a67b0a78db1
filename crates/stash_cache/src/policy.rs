use http::{Method, StatusCode};
use tokio::time::Duration;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// What gets cached and for how long. One TTL for every entry.
#[derive(Clone, Copy, Debug)]
pub struct CachePolicy {
    ttl: Duration,
}

impl CachePolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_cacheable(method: &Method) -> bool {
        *method == Method::GET
    }

    /// Only 2xx responses are ever stored.
    pub fn is_cacheable_status(status: StatusCode) -> bool {
        status.is_success()
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_get_and_success_are_cacheable() {
        assert!(CachePolicy::is_cacheable(&Method::GET));
        assert!(!CachePolicy::is_cacheable(&Method::HEAD));
        assert!(!CachePolicy::is_cacheable(&Method::POST));

        assert!(CachePolicy::is_cacheable_status(StatusCode::OK));
        assert!(CachePolicy::is_cacheable_status(StatusCode::NO_CONTENT));
        assert!(!CachePolicy::is_cacheable_status(StatusCode::NOT_MODIFIED));
        assert!(!CachePolicy::is_cacheable_status(StatusCode::NOT_FOUND));
    }

    #[test]
    fn default_ttl_is_sixty_seconds() {
        assert_eq!(CachePolicy::default().ttl(), Duration::from_secs(60));
    }
}
