//! Storage introspection and cleanup handlers.

use crate::api::types::{path_param, ApiResponse};
use crate::request::InboundRequest;
use crate::response::json_response;
use crate::service::MockService;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::info;

/// GET /storage[?path=...] - whole tree, or the subtree at `path`, or null
pub fn handle_get(req: &InboundRequest, service: &MockService) -> Response<Full<Bytes>> {
    let registry = service.registry();
    let data = match path_param(req) {
        Some(path) => registry
            .find(&path)
            .and_then(|node| serde_json::to_value(node).ok())
            .unwrap_or(serde_json::Value::Null),
        None => serde_json::to_value(registry.snapshot()).unwrap_or_default(),
    };

    json_response(StatusCode::OK, &ApiResponse::ok(data))
}

/// POST /cleanup_storage[?path=...] - delete one mock or all of them
pub fn handle_cleanup(req: &InboundRequest, service: &MockService) -> Response<Full<Bytes>> {
    let registry = service.registry();
    let success = match path_param(req) {
        Some(path) => {
            info!("Cleaning up mock storage at {}", path);
            registry.delete(&path)
        }
        None => registry.clear(),
    };

    json_response(
        StatusCode::OK,
        &ApiResponse::with_success(success, registry.snapshot()),
    )
}
