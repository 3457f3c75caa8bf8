//! Edge Module
//!
//! Request entry point: host routing, local overrides, proxy delegation and
//! the edge-wide response headers.
//!
//! # Flow
//! - Host equals the API host: handed to the API router
//! - Override file exists under the static root: served, tagged `custom-modified file`
//! - Otherwise: proxied through the cache, tagged `proxy-original file`

pub mod handler;
pub mod provenance;
pub mod routes;
pub mod static_files;

pub use handler::{edge_handler, AppState};
pub use provenance::{Provenance, EDGE_CACHE_CONTROL, FILE_SOURCE_HEADER};
pub use routes::create_router;
