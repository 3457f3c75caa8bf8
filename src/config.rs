//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL_SECS};
use crate::error::{ProxyError, Result};

/// Default origin the proxy forwards to
pub const DEFAULT_ORIGIN_URL: &str = "http://127.0.0.1:8080";

/// Default host routed to the API layer instead of the edge
pub const DEFAULT_API_HOST: &str = "api.ex.com";

// == Config ==
/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the origin service
    pub origin_url: String,
    /// Maximum total body bytes held by the cache
    pub cache_capacity: usize,
    /// Lifetime of a cached response in seconds
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Requests for this host go to the API router
    pub api_host: String,
    /// Directory whose files override origin responses
    pub static_root: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ORIGIN_URL` - Origin base URL (default: http://127.0.0.1:8080)
    /// - `CACHE_CAPACITY` - Cache capacity in bytes (default: 1 GiB)
    /// - `CACHE_TTL` - Cache entry TTL in seconds (default: 15 days)
    /// - `SERVER_PORT` - HTTP server port (default: 80)
    /// - `API_HOST` - Host handled by the API router (default: api.ex.com)
    /// - `STATIC_ROOT` - Static override directory (default: wwwroot)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            origin_url: env::var("ORIGIN_URL").unwrap_or(defaults.origin_url),
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            api_host: env::var("API_HOST").unwrap_or(defaults.api_host),
            static_root: env::var("STATIC_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_root),
        }
    }

    /// Parses and validates the origin URL.
    ///
    /// The origin must be an absolute http(s) URL with a host; anything else
    /// is a fatal configuration error.
    pub fn origin(&self) -> Result<Url> {
        parse_origin(&self.origin_url)
    }

    /// Returns the cache entry lifetime.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin_url: DEFAULT_ORIGIN_URL.to_string(),
            cache_capacity: DEFAULT_CAPACITY,
            cache_ttl: DEFAULT_TTL_SECS,
            server_port: 80,
            api_host: DEFAULT_API_HOST.to_string(),
            static_root: PathBuf::from("wwwroot"),
        }
    }
}

/// Parses an origin base URL, rejecting non-http(s) or host-less URLs.
pub fn parse_origin(raw: &str) -> Result<Url> {
    let invalid = |reason: String| ProxyError::InvalidOrigin {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
