//! Cache Entry Module
//!
//! Defines a single cached origin response with its expiration deadline.

use std::time::Instant;

use axum::body::Bytes;
use axum::http::HeaderMap;

// == Cache Entry ==
/// A stored origin response, keyed by request path.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The request path this entry was stored under
    pub key: String,
    /// Response body
    pub value: Bytes,
    /// Response headers, duplicates preserved
    pub headers: HeaderMap,
    /// Bytes charged against the store capacity
    pub size: usize,
    /// Absolute expiration deadline
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(
        key: String,
        value: Bytes,
        headers: HeaderMap,
        size: usize,
        expires_at: Instant,
    ) -> Self {
        Self {
            key,
            value,
            headers,
            size,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// An entry stays valid up to and including its deadline; it is expired
    /// only once `now` is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}
