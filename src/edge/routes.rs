//! Edge Routes
//!
//! Configures the top-level Axum router that every request enters through.

use std::time::Duration;

use axum::{body::Body, http::Response, Router};
use tower_http::trace::TraceLayer;
use tracing::{info, Span};

use super::handler::{edge_handler, AppState};
use super::provenance::Provenance;

/// Creates the server router.
///
/// Every request, whatever its host or path, goes through [`edge_handler`].
///
/// # Middleware
/// - Tracing: request spans plus one access line per response with its
///   provenance tag
pub fn create_router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().on_response(
        |response: &Response<Body>, latency: Duration, _span: &Span| {
            info!(
                status = %response.status(),
                latency_ms = latency.as_millis() as u64,
                provenance = %Provenance::from_headers(response.headers()),
                "finished processing request"
            );
        },
    );

    Router::new()
        .fallback(edge_handler)
        .layer(trace)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{shared, CacheStore};
    use crate::proxy::ProxyDispatcher;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;
    use url::Url;

    fn create_test_app(static_root: &std::path::Path) -> Router {
        let cache = shared(CacheStore::new(1024));
        let origin = Url::parse("http://127.0.0.1:9/").unwrap();
        let dispatcher = ProxyDispatcher::new(origin, cache, Duration::from_secs(60)).unwrap();
        create_router(AppState::new(dispatcher, "api.ex.com", static_root))
    }

    #[tokio::test]
    async fn test_api_host_health_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_test_app(dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::HOST, "api.ex.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("x-filesource").is_none());
    }

    #[tokio::test]
    async fn test_edge_static_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>patched</h1>").unwrap();
        let app = create_test_app(dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/index.html")
                    .header(header::HOST, "game.ex.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-filesource"], "custom-modified file");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "max-age=31536000, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_edge_proxy_failure_still_tagged() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_test_app(dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/not-overridden.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()["x-filesource"], "proxy-original file");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "max-age=31536000, must-revalidate"
        );
    }
}
