//! API Module
//!
//! Router for requests whose host is the configured API host. Business
//! routes live elsewhere; this only mounts operational endpoints.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Response cache statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_api_router;
