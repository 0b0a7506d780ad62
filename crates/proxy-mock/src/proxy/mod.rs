//! Proxy delegation for mocks that carry a `proxy_host`.
//!
//! # Module Structure
//!
//! - `client` - Upstream HTTP client creation and configuration
//! - `delegate` - The `ProxyDelegate` seam and its `reqwest` implementation
//! - `headers` - Header filtering and insertion helpers

mod client;
mod delegate;
mod headers;

pub use client::create_http_client;
pub use delegate::{target_url, HttpProxyDelegate, ProxyDelegate, ProxyError, ProxyReply};
pub use headers::{forwardable_request_headers, is_hop_by_hop, MockHeadersExt, VALUE_PROXIED, X_PROXY_MOCK};
