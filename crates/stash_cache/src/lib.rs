//! In-memory response cache with lazy TTL expiry.

pub mod entry;
pub mod key;
pub mod policy;
pub mod stats;
pub mod store;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use policy::{CachePolicy, DEFAULT_TTL};
pub use stats::CacheStatsSnapshot;
pub use store::CacheStore;
