//! Upstream Rewriting
//!
//! URL and header rewriting applied to requests forwarded to the origin and
//! to the responses relayed back.

use axum::http::{header, HeaderMap, HeaderName, Uri};
use url::Url;

/// Client identity header removed before forwarding.
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Connection-scoped headers that never cross the proxy.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Joins two path fragments with exactly one slash between them.
///
/// ```
/// use edge_cache::proxy::single_joining_slash;
///
/// assert_eq!(single_joining_slash("/base/", "/a"), "/base/a");
/// assert_eq!(single_joining_slash("/base", "a"), "/base/a");
/// assert_eq!(single_joining_slash("/base", "/a"), "/base/a");
/// ```
pub fn single_joining_slash(base: &str, suffix: &str) -> String {
    match (base.ends_with('/'), suffix.starts_with('/')) {
        (true, true) => format!("{}{}", base, &suffix[1..]),
        (false, false) => format!("{}/{}", base, suffix),
        _ => format!("{}{}", base, suffix),
    }
}

/// Builds the origin URL for a client request URI.
///
/// Scheme, host and port come from the origin; the path is the origin base
/// path joined with the request path; the query string is the client's.
pub fn upstream_url(origin: &Url, uri: &Uri) -> Url {
    let mut url = origin.clone();
    url.set_path(&single_joining_slash(origin.path(), uri.path()));
    url.set_query(uri.query());
    url
}

/// Copies client headers for the upstream request.
///
/// `Host` and `Content-Length` are left to the HTTP client, which derives
/// them from the rewritten URL and the buffered body.
pub fn forward_request_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = strip_hop_by_hop(headers);
    forwarded.remove(&X_FORWARDED_FOR);
    forwarded.remove(header::HOST);
    forwarded.remove(header::CONTENT_LENGTH);
    forwarded
}

/// Copies origin response headers, dropping connection-scoped ones.
pub fn relay_response_headers(headers: &HeaderMap) -> HeaderMap {
    strip_hop_by_hop(headers)
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut stripped = headers.clone();
    for name in &HOP_BY_HOP {
        stripped.remove(name);
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_single_joining_slash_cases() {
        assert_eq!(single_joining_slash("/", "/index.html"), "/index.html");
        assert_eq!(single_joining_slash("", "index.html"), "/index.html");
        assert_eq!(single_joining_slash("", "/index.html"), "/index.html");
        assert_eq!(single_joining_slash("/base/", "img/a.png"), "/base/img/a.png");
        assert_eq!(single_joining_slash("/base/", "/img/a.png"), "/base/img/a.png");
        assert_eq!(single_joining_slash("/base", "/img/a.png"), "/base/img/a.png");
        assert_eq!(single_joining_slash("/base", "img/a.png"), "/base/img/a.png");
    }

    #[test]
    fn test_upstream_url_rewrites_authority_and_path() {
        let origin = Url::parse("https://origin.example.com:8443/static").unwrap();
        let uri: Uri = "http://edge.local/js/app.js?v=3&x=y".parse().unwrap();

        let url = upstream_url(&origin, &uri);
        assert_eq!(
            url.as_str(),
            "https://origin.example.com:8443/static/js/app.js?v=3&x=y"
        );
    }

    #[test]
    fn test_upstream_url_root_origin_without_query() {
        let origin = Url::parse("http://origin.example.com").unwrap();
        let uri: Uri = "/game/main.swf".parse().unwrap();

        let url = upstream_url(&origin, &uri);
        assert_eq!(url.as_str(), "http://origin.example.com/game/main.swf");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_upstream_url_drops_origin_query() {
        let origin = Url::parse("http://origin.example.com/?token=1").unwrap();
        let uri: Uri = "/a".parse().unwrap();

        assert_eq!(upstream_url(&origin, &uri).as_str(), "http://origin.example.com/a");
    }

    #[test]
    fn test_forward_request_headers_strips_identity_and_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("edge.local"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("3"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));

        let forwarded = forward_request_headers(&headers);
        assert!(forwarded.get("x-forwarded-for").is_none());
        assert!(forwarded.get(header::HOST).is_none());
        assert!(forwarded.get(header::CONNECTION).is_none());
        assert!(forwarded.get(header::CONTENT_LENGTH).is_none());
        assert_eq!(forwarded[header::ACCEPT], "*/*");
        assert_eq!(forwarded.get_all(header::COOKIE).iter().count(), 2);
    }

    #[test]
    fn test_relay_response_headers_keeps_end_to_end() {
        let mut headers = HeaderMap::new();
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));

        let relayed = relay_response_headers(&headers);
        assert!(relayed.get(header::TRANSFER_ENCODING).is_none());
        assert_eq!(relayed[header::CACHE_CONTROL], "no-store");
        assert_eq!(relayed[header::CONTENT_TYPE], "text/html");
    }
}
