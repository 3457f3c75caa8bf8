//! Edge Handler
//!
//! Per-request decision between the API router, a local override file and
//! the caching proxy.

use std::path::PathBuf;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceExt;
use tracing::debug;

use super::provenance::{Provenance, EDGE_CACHE_CONTROL, FILE_SOURCE_HEADER};
use super::static_files::{find_override, serve_file};
use crate::api::create_api_router;
use crate::cache::{shared, CacheStore};
use crate::config::Config;
use crate::error::Result;
use crate::proxy::ProxyDispatcher;

/// Application state shared across all requests.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aware origin forwarder
    pub dispatcher: ProxyDispatcher,
    /// Router for requests addressed to `api_host`
    pub api: Router,
    /// Host value that selects the API router
    pub api_host: String,
    /// Directory holding local override files
    pub static_root: PathBuf,
}

impl AppState {
    /// Creates state around an existing dispatcher.
    ///
    /// The API router defaults to the operational endpoints over the
    /// dispatcher's cache.
    pub fn new(
        dispatcher: ProxyDispatcher,
        api_host: impl Into<String>,
        static_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api: create_api_router(dispatcher.cache().clone()),
            dispatcher,
            api_host: api_host.into(),
            static_root: static_root.into(),
        }
    }

    /// Creates state from configuration.
    ///
    /// Fails if the origin URL is unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        let origin = config.origin()?;
        let cache = shared(CacheStore::new(config.cache_capacity));
        let dispatcher = ProxyDispatcher::new(origin, cache, config.ttl())?;
        Ok(Self::new(
            dispatcher,
            config.api_host.clone(),
            config.static_root.clone(),
        ))
    }
}

/// Handler for every request reaching the server.
///
/// API host traffic is handed to the API router untouched. Everything else
/// is an edge request: a local override file wins over the proxy, and the
/// response is tagged with its provenance and the edge cache directive.
pub async fn edge_handler(State(state): State<AppState>, req: Request) -> Response {
    if is_api_request(&req, &state.api_host) {
        debug!(uri = %req.uri(), "routing to api");
        return match state.api.clone().oneshot(req).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
    }

    let path = req.uri().path().to_string();
    let (mut response, provenance) = match find_override(&state.static_root, &path).await {
        Some(file) => (serve_file(file, req).await, Provenance::Modified),
        None => (
            state.dispatcher.dispatch(req).await.into_response(),
            Provenance::Original,
        ),
    };

    let headers = response.headers_mut();
    headers.insert(FILE_SOURCE_HEADER, provenance.header_value());
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(EDGE_CACHE_CONTROL),
    );

    debug!(%path, status = %response.status(), %provenance, "edge response");
    response
}

fn is_api_request(req: &Request, api_host: &str) -> bool {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().host());
    host == Some(api_host)
}
