//! HTTP mock server.
//!
//! Tests register canned responses keyed by request path, optionally point a
//! mock at a real upstream, and read back the requests the server observed.
//!
//! ## Module Structure
//!
//! - `mock`: registry, segment tree and payload validation
//! - `service`: per-instance state and the dispatch state machine
//! - `response`: response rendering (local bodies, delays, proxied replies)
//! - `proxy`: upstream client and the `ProxyDelegate` seam
//! - `recording`: captured request parameters
//! - `api`: hyper server and routing
//! - `config`: YAML configuration

pub mod api;
pub mod config;
pub mod mock;
pub mod proxy;
pub mod recording;
pub mod request;
pub mod response;
pub mod service;

pub use api::MockServer;
pub use config::Config;
pub use mock::{MockBody, MockEntry, Registry};
pub use proxy::{HttpProxyDelegate, ProxyDelegate};
pub use recording::{RequestRecord, RequestRecorder};
pub use request::InboundRequest;
pub use service::{DispatchOutcome, MockService};
