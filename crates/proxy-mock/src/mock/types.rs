//! Type definitions for registered mocks.
//!
//! This module contains the entry model, its body variants, the stored
//! representation returned to callers and the registry error type.

use super::validation::ValidationError;
use bytes::Bytes;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ============================================================================
// Mock Entry
// ============================================================================

/// Body of a mock response.
///
/// The three representations are mutually exclusive: a mock either replies
/// with no body, with UTF-8 text, or with raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MockBody {
    #[default]
    None,
    Text(String),
    Binary(Bytes),
}

impl MockBody {
    pub fn is_binary(&self) -> bool {
        matches!(self, MockBody::Binary(_))
    }

    /// Render the body for JSON output.
    ///
    /// Binary bodies are shown as an escaped byte string (`b"\x01abc"`), never
    /// as the raw bytes.
    pub fn display(&self) -> Option<String> {
        match self {
            MockBody::None => None,
            MockBody::Text(text) => Some(text.clone()),
            MockBody::Binary(bytes) => Some(format!("{bytes:?}")),
        }
    }
}

/// A single registered mock, keyed by its normalized path.
#[derive(Debug, Clone, PartialEq)]
pub struct MockEntry {
    pub path: String,
    /// Upstream base URL; when set, matched requests are forwarded.
    pub proxy_host: Option<String>,
    /// Simulated latency in seconds.
    pub timeout: Option<f64>,
    pub body: MockBody,
    pub status_code: u16,
    /// Response headers in registration order.
    pub headers: Vec<(String, String)>,
    /// Opaque annotation echoed into recorded requests.
    pub extra_info: serde_json::Value,
}

impl MockEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            proxy_host: None,
            timeout: None,
            body: MockBody::None,
            status_code: 200,
            headers: Vec::new(),
            extra_info: serde_json::Value::Null,
        }
    }

    pub fn with_body(mut self, body: MockBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_proxy_host(mut self, host: impl Into<String>) -> Self {
        self.proxy_host = Some(host.into());
        self
    }

    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn with_extra_info(mut self, extra_info: serde_json::Value) -> Self {
        self.extra_info = extra_info;
        self
    }

    /// Delay to apply before replying, if any.
    pub fn delay(&self) -> Option<std::time::Duration> {
        self.timeout
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| std::time::Duration::try_from_secs_f64(secs).ok())
    }

    /// Stored representation returned by registration and storage queries.
    pub fn to_stored(&self) -> StoredMock {
        StoredMock {
            path: self.path.clone(),
            proxy_host: self.proxy_host.clone(),
            timeout: self.timeout,
            extra_info: self.extra_info.clone(),
            mock_data: MockData {
                body: self.body.display(),
                status_code: self.status_code,
                headers: OrderedHeaders(self.headers.clone()),
            },
        }
    }
}

// ============================================================================
// Stored Representation
// ============================================================================

/// JSON view of a registered mock.
#[derive(Debug, Clone, Serialize)]
pub struct StoredMock {
    pub path: String,
    pub proxy_host: Option<String>,
    pub timeout: Option<f64>,
    pub extra_info: serde_json::Value,
    pub mock_data: MockData,
}

/// Response part of [`StoredMock`].
#[derive(Debug, Clone, Serialize)]
pub struct MockData {
    pub body: Option<String>,
    pub status_code: u16,
    pub headers: OrderedHeaders,
}

/// Header list that serializes as a JSON object, keeping insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedHeaders(pub Vec<(String, String)>);

impl Serialize for OrderedHeaders {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Mock path must name at least one segment")]
    EmptyPath,
    #[error("Path segment '{0}' is reserved")]
    ReservedSegment(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
