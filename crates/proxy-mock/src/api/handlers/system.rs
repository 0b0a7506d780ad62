//! System handlers.

use crate::response::json_response;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};

/// GET /status - liveness and version, no state access
pub fn handle_status() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &serde_json::json!({"success": true, "version": env!("CARGO_PKG_VERSION")}),
    )
}
