//! Response Provenance
//!
//! Tags every edge response with where its body came from.

use std::fmt;

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Response header carrying the provenance tag.
pub const FILE_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-filesource");

/// Cache directive set on every edge response.
///
/// Clients may keep a copy but must revalidate before each reuse, so a local
/// override takes effect on the next request instead of after a year.
pub const EDGE_CACHE_CONTROL: &str = "max-age=31536000, must-revalidate";

// == Provenance ==
/// Where an edge response body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Served from a local override file
    Modified,
    /// Served through the proxy, from the cache or live from the origin
    Original,
    /// No recognizable tag on the response
    Unknown,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Modified => "custom-modified file",
            Provenance::Original => "proxy-original file",
            Provenance::Unknown => "unknown-source",
        }
    }

    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_static(self.as_str())
    }

    /// Reads the provenance tag back from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers
            .get(&FILE_SOURCE_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            Some("custom-modified file") => Provenance::Modified,
            Some("proxy-original file") => Provenance::Original,
            _ => Provenance::Unknown,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
