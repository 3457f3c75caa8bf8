//! Cache Module
//!
//! Provides the in-memory response cache with byte-size bounded LRU eviction
//! and lazy TTL expiration.

mod entry;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruList;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Cache handle shared between the dispatcher and the API router.
///
/// Lookups and inserts both reorder the recency list, so they take the write
/// guard; only statistics snapshots use the read guard.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Public Constants ==
/// Default cache capacity in bytes
pub const DEFAULT_CAPACITY: usize = 1024 * 1024 * 1024; // 1 GiB

/// Default entry lifetime in seconds
pub const DEFAULT_TTL_SECS: u64 = 15 * 24 * 60 * 60; // 15 days

/// Wraps a store for sharing across request tasks.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}
