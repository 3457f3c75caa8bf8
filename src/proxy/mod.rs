//! Proxy Module
//!
//! Forwards edge requests to the origin, consulting and populating the
//! response cache along the way.

mod dispatcher;
mod upstream;

pub use dispatcher::{ProxyDispatcher, MAX_TTL};
pub use upstream::{
    forward_request_headers, relay_response_headers, single_joining_slash, upstream_url,
    X_FORWARDED_FOR,
};
