//! Mock configuration handlers.

use crate::api::types::{ApiResponse, ValidationErrorResponse};
use crate::mock::{validate_payload, BodyEncoding, MockError, ValidationIssue};
use crate::request::InboundRequest;
use crate::response::json_response;
use crate::service::MockService;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::{debug, warn};

/// POST /configure_mock - JSON body, textual `body` field
/// POST /configure_mock/binary - JSON body, base64 `body` field
pub fn handle_configure(
    req: &InboundRequest,
    encoding: BodyEncoding,
    service: &MockService,
) -> Response<Full<Bytes>> {
    let payload: serde_json::Value = match serde_json::from_slice(&req.body) {
        Ok(v) => v,
        Err(e) => {
            debug!("Rejected mock payload: {}", e);
            return invalid(vec![ValidationIssue {
                kind: "json_invalid".to_string(),
                loc: Vec::new(),
                msg: format!("Invalid JSON: {e}"),
            }]);
        }
    };

    let entry = match validate_payload(&payload, encoding) {
        Ok(entry) => entry,
        Err(e) => {
            warn!("{}", e);
            return invalid(e.issues);
        }
    };

    match service.registry().register(entry) {
        Ok(stored) => {
            let path = stored.path.clone();
            json_response(StatusCode::CREATED, &ApiResponse::ok(stored).with_path(path))
        }
        Err(MockError::Validation(e)) => invalid(e.issues),
        Err(e) => {
            warn!("{}", e);
            invalid(vec![ValidationIssue {
                kind: "value_error".to_string(),
                loc: vec!["path".to_string()],
                msg: e.to_string(),
            }])
        }
    }
}

fn invalid(issues: Vec<ValidationIssue>) -> Response<Full<Bytes>> {
    json_response(StatusCode::BAD_REQUEST, &ValidationErrorResponse::new(issues))
}
