//! Proxy Dispatcher
//!
//! Cache-aside forwarding to the origin: serve from the cache when possible,
//! otherwise fetch from the origin and store eligible responses.

use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderMap, Method, StatusCode},
    response::Response,
};
use reqwest::redirect::Policy;
use tracing::{debug, warn};
use url::Url;

use super::upstream::{forward_request_headers, relay_response_headers, upstream_url};
use crate::cache::SharedCache;
use crate::error::{ProxyError, Result};

/// Upper bound on the lifetime of cached responses.
///
/// Keeps `Instant::now() + ttl` representable on every platform.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Proxy Dispatcher ==
/// Resolves requests against the shared cache and a single origin.
#[derive(Debug, Clone)]
pub struct ProxyDispatcher {
    /// Origin base URL
    origin: Url,
    /// HTTP client used for origin requests
    client: reqwest::Client,
    /// Shared response cache
    cache: SharedCache,
    /// Lifetime given to newly cached responses
    ttl: Duration,
}

impl ProxyDispatcher {
    // == Constructor ==
    /// Creates a dispatcher forwarding to `origin`.
    ///
    /// Redirects are relayed to the client rather than followed. A `ttl`
    /// above [`MAX_TTL`] is clamped to it.
    pub fn new(origin: Url, cache: SharedCache, ttl: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            origin,
            client,
            cache,
            ttl: ttl.min(MAX_TTL),
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Lifetime given to newly cached responses.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Dispatch ==
    /// Serves `req` from the cache or the origin.
    ///
    /// The cache key is the request path alone; query string and headers do
    /// not take part.
    pub async fn dispatch(&self, req: Request) -> Result<Response> {
        let cache_key = req.uri().path().to_string();

        let cached = self.cache.write().await.get(&cache_key);
        if let Some((body, headers)) = cached {
            debug!(key = %cache_key, "serving cached response");
            return Ok(build_response(StatusCode::OK, headers, body));
        }

        self.forward(req, cache_key).await
    }

    // == Forward ==
    async fn forward(&self, req: Request, cache_key: String) -> Result<Response> {
        let (parts, body) = req.into_parts();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(|e| ProxyError::InvalidRequest(e.to_string()))?;

        let url = upstream_url(&self.origin, &parts.uri);
        debug!(method = %parts.method, %url, "forwarding to origin");

        let upstream = self
            .client
            .request(parts.method.clone(), url)
            .headers(forward_request_headers(&parts.headers))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(key = %cache_key, error = %e, "origin request failed");
                ProxyError::Upstream(e)
            })?;

        let status = upstream.status();
        let mut headers = relay_response_headers(upstream.headers());

        let body = upstream.bytes().await.map_err(|e| {
            warn!(key = %cache_key, %status, error = %e, "failed to read origin body");
            ProxyError::BodyRead(e.to_string())
        })?;

        if status != StatusCode::OK {
            debug!(key = %cache_key, %status, "relaying uncacheable origin response");
            return Ok(build_response(status, headers, body));
        }

        headers.remove(header::CACHE_CONTROL);
        if parts.method != Method::HEAD {
            match Instant::now().checked_add(self.ttl) {
                Some(expires_at) => self.cache.write().await.put(
                    cache_key,
                    body.clone(),
                    headers.clone(),
                    body.len(),
                    expires_at,
                ),
                None => {
                    warn!(key = %cache_key, ttl = ?self.ttl, "expiry out of range, not caching")
                }
            }
        }

        Ok(build_response(StatusCode::OK, headers, body))
    }
}

fn build_response(status: StatusCode, headers: HeaderMap, body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
