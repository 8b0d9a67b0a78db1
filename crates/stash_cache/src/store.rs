use bytes::Bytes;
use dashmap::DashMap;
use http::StatusCode;
use tokio::time::Instant;
use tracing::debug;

use crate::entry::CacheEntry;
use crate::key::CacheKey;
use crate::policy::CachePolicy;
use crate::stats::{CacheStats, CacheStatsSnapshot};

/// Process-wide response store.
///
/// Expiry is only enforced when a key is read (or by an explicit
/// [`CacheStore::purge_expired`]). Keys that are written and never read
/// again stay in memory until the process exits.
#[derive(Debug)]
pub struct CacheStore {
    entries: DashMap<CacheKey, CacheEntry>,
    policy: CachePolicy,
    stats: CacheStats,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::with_policy(CachePolicy::default())
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            entries: DashMap::new(),
            policy,
            stats: CacheStats::default(),
        }
    }

    /// Returns a copy of the entry if it is still within its TTL.
    ///
    /// An expired entry is removed before returning `None`. The removal
    /// re-checks expiry under the shard lock, so a fresh entry written
    /// concurrently for the same key is never dropped.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let now = Instant::now();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.stats.record_hit();
                debug!(target: "stash::cache", cache_key = %key, "Cache hit");
                return Some(entry.value().clone());
            }
            Some(_) => {}
            None => {
                self.stats.record_miss();
                debug!(target: "stash::cache", cache_key = %key, "Cache miss");
                return None;
            }
        }

        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired_at(now))
            .is_some()
        {
            self.stats.record_expired(1);
            debug!(target: "stash::cache", cache_key = %key, "TTL expired; entry removed");
        }
        self.stats.record_miss();
        None
    }

    /// Inserts or fully replaces the entry for `key`.
    pub fn put(&self, key: CacheKey, entry: CacheEntry) {
        debug!(
            target: "stash::cache",
            cache_key = %key,
            status = entry.status.as_u16(),
            bytes = entry.body.len(),
            "Saving response to cache"
        );
        self.entries.insert(key, entry);
        self.stats.record_store();
    }

    /// Stores an origin response stamped with `now` and the policy TTL.
    pub fn insert_response(
        &self,
        key: CacheKey,
        body: Bytes,
        content_type: Option<String>,
        status: StatusCode,
    ) {
        let entry = CacheEntry::new(key.clone(), body, content_type, status, self.policy.ttl());
        self.put(key, entry);
    }

    /// Drops every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        self.stats.record_expired(removed as u64);
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot(self.entries.len())
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::{advance, Duration};

    fn store_text(store: &CacheStore, key: &str, body: &'static str) {
        store.insert_response(
            CacheKey::new(key),
            Bytes::from_static(body.as_bytes()),
            Some("text/plain".into()),
            StatusCode::OK,
        );
    }

    #[test]
    fn get_unknown_key_is_absent() {
        let store = CacheStore::new();
        assert!(store.get(&CacheKey::new("/never")).is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_valid_within_ttl() {
        let store = CacheStore::new();
        store_text(&store, "/greet", "hello");

        advance(Duration::from_secs(60)).await;
        let entry = store.get(&CacheKey::new("/greet")).expect("entry within ttl");
        assert_eq!(entry.body, Bytes::from_static(b"hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_removed_on_read() {
        let store = CacheStore::new();
        store_text(&store, "/greet", "hello");

        advance(Duration::from_secs(61)).await;
        assert!(store.get(&CacheKey::new("/greet")).is_none());
        assert!(store.is_empty());
        assert!(store.get(&CacheKey::new("/greet")).is_none());

        let stats = store.stats();
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_hits_are_identical() {
        let store = CacheStore::new();
        store_text(&store, "/greet", "hello");

        let first = store.get(&CacheKey::new("/greet")).expect("first hit");
        advance(Duration::from_secs(10)).await;
        let second = store.get(&CacheKey::new("/greet")).expect("second hit");

        assert_eq!(first.body, second.body);
        assert_eq!(first.content_type, second.content_type);
        assert_eq!(first.status, second.status);
        assert_eq!(store.stats().hits, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn put_replaces_entry_and_resets_timestamp() {
        let store = CacheStore::new();
        store_text(&store, "/greet", "hello");

        advance(Duration::from_secs(50)).await;
        store.insert_response(
            CacheKey::new("/greet"),
            Bytes::from_static(b"{\"hi\":1}"),
            None,
            StatusCode::CREATED,
        );

        advance(Duration::from_secs(50)).await;
        let entry = store.get(&CacheKey::new("/greet")).expect("replaced entry still fresh");
        assert_eq!(entry.body, Bytes::from_static(b"{\"hi\":1}"));
        assert_eq!(entry.content_type, None);
        assert_eq!(entry.status, StatusCode::CREATED);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn purge_expired_only_drops_stale_entries() {
        let store = CacheStore::new();
        store_text(&store, "/old", "a");
        advance(Duration::from_secs(45)).await;
        store_text(&store, "/new", "b");
        advance(Duration::from_secs(20)).await;

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&CacheKey::new("/new")).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_policy_ttl_applies() {
        let store = CacheStore::with_policy(CachePolicy::new(Duration::from_secs(5)));
        store_text(&store, "/short", "x");

        advance(Duration::from_secs(6)).await;
        assert!(store.get(&CacheKey::new("/short")).is_none());
    }

    #[test]
    fn concurrent_puts_leave_one_entry() {
        let store = Arc::new(CacheStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.insert_response(
                        CacheKey::new("/race"),
                        Bytes::from(format!("body-{i}")),
                        None,
                        StatusCode::OK,
                    );
                    store.get(&CacheKey::new("/race")).is_some()
                })
            })
            .collect();

        for h in handles {
            assert!(h.join().expect("thread panicked"));
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().stores, 8);
    }

    #[test]
    fn racing_reads_of_expired_entry_remove_it_once() {
        let store = Arc::new(CacheStore::with_policy(CachePolicy::new(
            Duration::from_millis(1),
        )));
        store_text(&store, "/stale", "old");
        std::thread::sleep(std::time::Duration::from_millis(20));

        let barrier = Arc::new(std::sync::Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    store.get(&CacheKey::new("/stale")).is_none()
                })
            })
            .collect();

        for h in handles {
            assert!(h.join().expect("thread panicked"));
        }
        let stats = store.stats();
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.misses, 8);
        assert_eq!(stats.hits, 0);
        assert!(store.is_empty());
    }
}
