//! API Handlers
//!
//! Operational endpoints served on the API host.

use axum::{extract::State, Json};

use crate::cache::SharedCache;
use crate::models::{HealthResponse, StatsResponse};

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(cache): State<SharedCache>) -> Json<StatsResponse> {
    // Read lock is enough, stats() does not touch recency
    let stats = cache.read().await.stats();

    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
