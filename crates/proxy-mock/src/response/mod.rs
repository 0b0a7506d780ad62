//! Response construction for mocks, proxied replies and API payloads.

mod builder;
mod render;

pub use builder::ResponseBuilder;
pub use render::{render_local, render_proxy_reply, respond, OCTET_STREAM};

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Serialize `body` as JSON with the given status.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    ResponseBuilder::new(status)
        .content_type("application/json")
        .body(json)
        .build()
}

/// `{"error": message}` with the given status.
pub fn json_error(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &serde_json::json!({ "error": message }))
}
