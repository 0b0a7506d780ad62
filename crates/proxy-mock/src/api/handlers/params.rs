//! Captured request parameter handlers.

use crate::api::types::ApiResponse;
use crate::response::json_response;
use crate::service::MockService;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::info;

/// GET /mock_params - every captured request, oldest first
pub fn handle_get(service: &MockService) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &ApiResponse::ok(service.recorder().snapshot()))
}

/// POST /cleanup_params - reset the capture buffer
pub fn handle_cleanup(service: &MockService) -> Response<Full<Bytes>> {
    let fresh = service.recorder().reset();
    info!("Request parameters cleared");
    json_response(StatusCode::OK, &ApiResponse::ok(fresh))
}
