//! API Routes
//!
//! Configures the router that receives API host traffic.

use axum::{routing::get, Router};

use super::handlers::{health_handler, stats_handler};
use crate::cache::SharedCache;

/// Creates the API host router.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Response cache statistics
pub fn create_api_router(cache: SharedCache) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .with_state(cache)
}
