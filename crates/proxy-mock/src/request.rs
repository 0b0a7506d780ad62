//! Buffered view of an inbound HTTP request.
//!
//! The router collects the body once and hands this struct to handlers, the
//! recorder and the proxy delegate, so none of them touch `hyper::body::Incoming`.

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri};
use std::borrow::Cow;
use std::collections::HashMap;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub client_addr: Option<SocketAddr>,
    path: String,
}

impl InboundRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        let path = decode_path(uri.path()).into_owned();
        Self {
            method,
            uri,
            path,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            client_addr: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers
            .append(name, hyper::header::HeaderValue::from_static(value));
        self
    }

    /// Percent-decoded request path, used for routing, dispatch and capture.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path exactly as it arrived on the wire.
    pub fn raw_path(&self) -> &str {
        self.uri.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Value of a single query parameter, URL-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query()
            .map(parse_query_string)
            .and_then(|mut params| params.remove(name))
    }

    /// Headers as plain strings. Non-UTF-8 values become empty strings;
    /// repeated headers keep the last value.
    pub fn header_map(&self) -> HashMap<String, String> {
        self.headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect()
    }
}

/// Percent-decode a request path. `+` is kept as is; a path that does not
/// decode to UTF-8 is returned unchanged.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}

/// Parse a query string into decoded key/value pairs. Keys without `=` map to
/// an empty value.
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(&key.replace('+', " "))
                .map(|k| k.into_owned())
                .unwrap_or_else(|_| key.to_string());
            let value = urlencoding::decode(&value.replace('+', " "))
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            (key, value)
        })
        .collect()
}
