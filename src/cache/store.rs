//! Cache Store Module
//!
//! Size-bounded response cache combining a key index with LRU ordering and
//! lazy TTL expiration.

use std::collections::HashMap;
use std::time::Instant;

use axum::body::Bytes;
use axum::http::HeaderMap;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruList};

// == Cache Store ==
/// Response cache bounded by the total byte size of its entries.
///
/// Lookups and inserts both promote the key to most recently used. Expired
/// entries are only dropped when a lookup finds them, so until then they keep
/// occupying capacity and remain eviction candidates like any other entry.
#[derive(Debug)]
pub struct CacheStore {
    /// Key -> slot in `order`
    index: HashMap<String, usize>,
    /// Entries by recency, most recent first
    order: LruList<CacheEntry>,
    /// Sum of `size` over all live entries
    total_size: usize,
    /// Maximum value of `total_size` once a call returns
    capacity: usize,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            order: LruList::new(),
            total_size: 0,
            capacity,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Looks up `key` against the current clock.
    ///
    /// See [`CacheStore::get_at`].
    pub fn get(&mut self, key: &str) -> Option<(Bytes, HeaderMap)> {
        self.get_at(key, Instant::now())
    }

    /// Looks up `key` as of `now`.
    ///
    /// Returns copies of the stored body and headers and promotes the entry
    /// to most recently used. An entry past its deadline is removed and
    /// reported as a miss.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<(Bytes, HeaderMap)> {
        let Some(&slot) = self.index.get(key) else {
            debug!(key, "cache miss");
            self.stats.record_miss();
            return None;
        };

        let expired = self
            .order
            .get(slot)
            .map_or(true, |entry| entry.is_expired_at(now));
        if expired {
            self.remove_slot(slot);
            debug!(key, "cache entry expired");
            self.stats.record_expiration();
            return None;
        }

        self.order.move_to_front(slot);
        let entry = self.order.get(slot)?;
        debug!(key, size = entry.size, "cache hit");
        self.stats.record_hit();
        Some((entry.value.clone(), entry.headers.clone()))
    }

    // == Put ==
    /// Stores a response under `key`, replacing any previous entry.
    ///
    /// After the write, least recently used entries are evicted until the
    /// total size fits the capacity again. An entry larger than the whole
    /// capacity therefore ends up evicting itself.
    pub fn put(
        &mut self,
        key: String,
        value: Bytes,
        headers: HeaderMap,
        size: usize,
        expires_at: Instant,
    ) {
        debug!(key = %key, size, "cache put");

        match self.index.get(&key).copied() {
            Some(slot) => {
                if let Some(entry) = self.order.get_mut(slot) {
                    self.total_size = self.total_size - entry.size + size;
                    entry.value = value;
                    entry.headers = headers;
                    entry.size = size;
                    entry.expires_at = expires_at;
                }
                self.order.move_to_front(slot);
            }
            None => {
                let entry = CacheEntry::new(key.clone(), value, headers, size, expires_at);
                let slot = self.order.push_front(entry);
                self.index.insert(key, slot);
                self.total_size += size;
            }
        }

        self.evict_to_capacity();
    }

    // == Eviction ==
    fn evict_to_capacity(&mut self) {
        while self.total_size > self.capacity {
            let Some(entry) = self.order.pop_back() else {
                break;
            };
            self.index.remove(&entry.key);
            self.total_size -= entry.size;
            self.stats.record_eviction();
            debug!(key = %entry.key, size = entry.size, "cache evicted");
        }
    }

    fn remove_slot(&mut self, slot: usize) -> Option<CacheEntry> {
        let entry = self.order.remove(slot)?;
        self.index.remove(&entry.key);
        self.total_size -= entry.size;
        Some(entry)
    }

    // == Inspection ==
    /// Returns true if `key` is stored, without touching recency or expiry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the stored keys, most recently used first.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Returns the bytes currently charged against capacity.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current number of entries, expired-but-unread included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.index.len();
        stats.total_size = self.total_size;
        stats.capacity = self.capacity;
        stats
    }

    /// Panics if the index, the recency list and the size total disagree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.order.len(), "index/list length mismatch");
        let mut sum = 0;
        for entry in self.order.iter() {
            let slot = self.index.get(&entry.key).copied();
            assert!(slot.is_some(), "listed key {} missing from index", entry.key);
            assert_eq!(
                slot.and_then(|slot| self.order.get(slot)).map(|e| &e.key),
                Some(&entry.key),
                "index points at the wrong slot"
            );
            sum += entry.size;
        }
        assert_eq!(sum, self.total_size, "running total drifted");
        assert!(self.total_size <= self.capacity, "capacity exceeded");
    }
}
