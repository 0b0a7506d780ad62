//! Types for captured inbound requests.

use crate::request::{parse_query_string, InboundRequest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters of one observed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_from: Option<String>,
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    /// JSON when the body parses as JSON, otherwise lossy UTF-8 text.
    pub body: Option<serde_json::Value>,
    pub timestamp: String,
    /// Annotation of the matched mock; absent on a miss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<serde_json::Value>,
}

impl RequestRecord {
    /// Capture an inbound request. `extra_info` is attached by the dispatcher
    /// once a mock has matched.
    pub fn capture(req: &InboundRequest) -> Self {
        Self {
            request_from: req.client_addr.map(|addr| addr.to_string()),
            method: req.method.to_string(),
            path: req.path().to_string(),
            query: req.query().map(parse_query_string).unwrap_or_default(),
            headers: req.header_map(),
            body: decode_body(&req.body),
            timestamp: chrono::Utc::now().to_rfc3339(),
            extra_info: None,
        }
    }

    pub fn with_extra_info(mut self, extra_info: serde_json::Value) -> Self {
        self.extra_info = Some(extra_info);
        self
    }
}

fn decode_body(body: &[u8]) -> Option<serde_json::Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body)
        .ok()
        .or_else(|| Some(serde_json::Value::String(String::from_utf8_lossy(body).into_owned())))
}
