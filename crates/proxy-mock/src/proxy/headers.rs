//! Header helpers for proxied and mocked responses.
//!
//! Static names avoid runtime `.parse().unwrap()` calls at insertion sites.

use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Response};

/// Marks a response that was produced by an upstream host.
pub static X_PROXY_MOCK: HeaderName = HeaderName::from_static("x-proxy-mock");

pub static VALUE_PROXIED: HeaderValue = HeaderValue::from_static("proxied");

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Request headers to send upstream: everything except `host`,
/// `content-length` and hop-by-hop headers.
pub fn forwardable_request_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if *name == hyper::header::HOST || *name == hyper::header::CONTENT_LENGTH || is_hop_by_hop(name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Extension trait for inserting headers into responses.
pub trait MockHeadersExt {
    /// Insert a header with a static name and value.
    fn set_header(&mut self, name: &HeaderName, value: &HeaderValue);
}

impl<B> MockHeadersExt for Response<B> {
    fn set_header(&mut self, name: &HeaderName, value: &HeaderValue) {
        self.headers_mut().insert(name.clone(), value.clone());
    }
}
