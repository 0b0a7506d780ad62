//! Response envelopes for the control endpoints.

use crate::mock::ValidationIssue;
use crate::request::InboundRequest;
use serde::Serialize;

/// `{"success": ..., "path": ..., "data": ...}` envelope shared by the
/// control endpoints. `path` is only present on registration replies.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            path: None,
            data,
        }
    }

    pub fn with_success(success: bool, data: T) -> Self {
        Self {
            success,
            path: None,
            data,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Body of a 400 reply to a rejected mock configuration.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub success: bool,
    pub error: Vec<ValidationIssue>,
}

impl ValidationErrorResponse {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self {
            success: false,
            error: issues,
        }
    }
}

/// The `path` query parameter, ignoring an empty value.
pub fn path_param(req: &InboundRequest) -> Option<String> {
    req.query_param("path").filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{Method, Uri};
    use serde_json::json;

    #[test]
    fn test_envelope_without_path() {
        let json = serde_json::to_value(ApiResponse::ok(json!([]))).unwrap();
        assert_eq!(json, json!({"success": true, "data": []}));
    }

    #[test]
    fn test_envelope_with_path() {
        let json = serde_json::to_value(ApiResponse::ok(1).with_path("/a")).unwrap();
        assert_eq!(json, json!({"success": true, "path": "/a", "data": 1}));
    }

    #[test]
    fn test_path_param_ignores_empty() {
        let req = InboundRequest::new(Method::GET, Uri::from_static("/storage?path="));
        assert_eq!(path_param(&req), None);

        let req = InboundRequest::new(Method::GET, Uri::from_static("/storage?path=%2Fa"));
        assert_eq!(path_param(&req).as_deref(), Some("/a"));
    }
}
