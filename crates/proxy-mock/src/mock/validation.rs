//! Validation of mock-configuration payloads.
//!
//! Payloads arrive as JSON. Every field is checked and all failures are
//! collected, so a caller sees the complete list in one 400 response instead
//! of fixing one field at a time.

use super::types::{MockBody, MockEntry};
use base64::Engine;
use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// How the `body` field of a payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// String bodies are used verbatim; other JSON values are serialized.
    Text,
    /// The body is a base64 string holding raw bytes.
    Base64,
}

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
}

impl ValidationIssue {
    fn new(kind: &str, field: &str, msg: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            loc: vec![field.to_string()],
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{} validation error(s) for mock payload", .issues.len())]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

/// Validate a JSON payload and build the entry it describes.
///
/// The returned entry's path is not normalized yet; the registry does that.
pub fn validate_payload(payload: &Value, encoding: BodyEncoding) -> Result<MockEntry, ValidationError> {
    let Some(fields) = payload.as_object() else {
        return Err(ValidationError {
            issues: vec![ValidationIssue {
                kind: "model_type".to_string(),
                loc: Vec::new(),
                msg: "Input should be an object".to_string(),
            }],
        });
    };

    let mut issues = Vec::new();

    let path = match fields.get("path") {
        None | Some(Value::Null) => {
            issues.push(ValidationIssue::new("missing", "path", "Field required"));
            String::new()
        }
        Some(Value::String(path)) if path.trim().is_empty() => {
            issues.push(ValidationIssue::new(
                "string_too_short",
                "path",
                "String should have at least 1 character",
            ));
            String::new()
        }
        Some(Value::String(path)) => path.clone(),
        Some(_) => {
            issues.push(ValidationIssue::new("string_type", "path", "Input should be a valid string"));
            String::new()
        }
    };

    let proxy_host = optional_string(fields, "proxy_host", &mut issues);
    if let Some(host) = &proxy_host {
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            issues.push(ValidationIssue::new(
                "url_scheme",
                "proxy_host",
                "URL scheme should be 'http' or 'https'",
            ));
        }
    }

    let timeout = match fields.get("timeout") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(secs) if secs >= 0.0 && Duration::try_from_secs_f64(secs).is_ok() => Some(secs),
            Some(secs) if secs >= 0.0 => {
                issues.push(ValidationIssue::new(
                    "less_than_equal",
                    "timeout",
                    "Input should be a delay that fits in a duration",
                ));
                None
            }
            _ => {
                issues.push(ValidationIssue::new(
                    "greater_than_equal",
                    "timeout",
                    "Input should be greater than or equal to 0",
                ));
                None
            }
        },
        Some(_) => {
            issues.push(ValidationIssue::new("float_type", "timeout", "Input should be a valid number"));
            None
        }
    };

    let status_code = match fields.get("status_code") {
        None | Some(Value::Null) => 200,
        Some(Value::Number(n)) => match n.as_u64() {
            Some(code) if (100..=599).contains(&code) => code as u16,
            _ => {
                issues.push(ValidationIssue::new(
                    "status_code_range",
                    "status_code",
                    "Input should be an HTTP status code between 100 and 599",
                ));
                200
            }
        },
        Some(_) => {
            issues.push(ValidationIssue::new("int_type", "status_code", "Input should be a valid integer"));
            200
        }
    };

    let mut headers = Vec::new();
    match fields.get("headers") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (name, value) in map {
                match value {
                    Value::String(v) => headers.push((name.clone(), v.clone())),
                    Value::Number(_) | Value::Bool(_) => headers.push((name.clone(), value.to_string())),
                    _ => issues.push(ValidationIssue {
                        kind: "string_type".to_string(),
                        loc: vec!["headers".to_string(), name.clone()],
                        msg: "Input should be a valid string".to_string(),
                    }),
                }
            }
        }
        Some(_) => {
            issues.push(ValidationIssue::new("dict_type", "headers", "Input should be a valid dictionary"));
        }
    }

    let body = match (encoding, fields.get("body")) {
        (_, None | Some(Value::Null)) => MockBody::None,
        (BodyEncoding::Text, Some(Value::String(text))) => MockBody::Text(text.clone()),
        (BodyEncoding::Text, Some(other)) => {
            if !has_header(&headers, "content-type") {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
            }
            MockBody::Text(other.to_string())
        }
        (BodyEncoding::Base64, Some(Value::String(encoded))) => {
            match base64::engine::general_purpose::STANDARD.decode(encoded) {
                Ok(bytes) => MockBody::Binary(Bytes::from(bytes)),
                Err(e) => {
                    issues.push(ValidationIssue::new("base64_decode", "body", format!("Invalid base64 data: {e}")));
                    MockBody::None
                }
            }
        }
        (BodyEncoding::Base64, Some(_)) => {
            issues.push(ValidationIssue::new(
                "string_type",
                "body",
                "Binary body should be a base64-encoded string",
            ));
            MockBody::None
        }
    };

    let extra_info = fields.get("extra_info").cloned().unwrap_or(Value::Null);

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    Ok(MockEntry {
        path,
        proxy_host,
        timeout,
        body,
        status_code,
        headers,
        extra_info,
    })
}

fn optional_string(fields: &Map<String, Value>, field: &str, issues: &mut Vec<ValidationIssue>) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            issues.push(ValidationIssue::new("string_type", field, "Input should be a valid string"));
            None
        }
    }
}

fn has_header(headers: &[(String, String)], name: &str) -> bool {
    headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
}
