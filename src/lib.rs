//! Edge Cache - An HTTP edge proxy for a single origin
//!
//! Serves local override files, replays cached origin responses, and
//! forwards everything else to the origin, caching successful responses
//! with LRU eviction and TTL expiration.

pub mod api;
pub mod cache;
pub mod config;
pub mod edge;
pub mod error;
pub mod models;
pub mod proxy;

pub use config::Config;
pub use edge::{create_router, AppState};
pub use error::{ProxyError, Result};
