use bytes::Bytes;
use http_body_util::Full;
use hyper::http::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Response, StatusCode};
use std::str::FromStr;
use tracing::warn;

pub struct ResponseBuilder {
    status: StatusCode,
    body: Bytes,
    headers: HeaderMap,
}

impl ResponseBuilder {
    pub fn new(status_code: StatusCode) -> Self {
        ResponseBuilder {
            status: status_code,
            body: Bytes::new(),
            headers: Default::default(),
        }
    }

    /// Start from a raw status code. Codes `http` cannot represent fall back
    /// to 500.
    pub fn with_status_code(status_code: u16) -> Self {
        let status = StatusCode::from_u16(status_code).unwrap_or_else(|_| {
            warn!("Invalid status code {}, using 500", status_code);
            StatusCode::INTERNAL_SERVER_ERROR
        });
        Self::new(status)
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a header. Invalid names or values are skipped with a warning.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::from_str(name), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => warn!("Skipping invalid response header {:?}: {:?}", name, value),
        }
        self
    }

    pub fn headers<'a, H>(self, headers: H) -> Self
    where
        H: IntoIterator<Item = &'a (String, String)>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (name, value)| builder.header(name, value))
    }

    /// Append every header from `headers` except those `skip` rejects.
    pub fn merge_headers<F>(mut self, headers: &HeaderMap, skip: F) -> Self
    where
        F: Fn(&HeaderName) -> bool,
    {
        for (name, value) in headers {
            if !skip(name) {
                self.headers.append(name.clone(), value.clone());
            }
        }
        self
    }

    /// Replace every `content-type` header with `value`.
    pub fn content_type(mut self, value: &'static str) -> Self {
        self.headers
            .insert(hyper::header::CONTENT_TYPE, HeaderValue::from_static(value));
        self
    }

    pub fn build(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::CONTENT_TYPE;

    #[test]
    fn test_builder_with_status() {
        let response = ResponseBuilder::new(StatusCode::CREATED).build();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_invalid_status_code_falls_back() {
        let response = ResponseBuilder::with_status_code(1000).build();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ResponseBuilder::with_status_code(418).build();
        assert_eq!(response.status().as_u16(), 418);
    }

    #[test]
    fn test_builder_with_headers() {
        let response = ResponseBuilder::new(StatusCode::OK)
            .header("X-Custom-Header", "test-value")
            .header("Content-Type", "application/json")
            .header("Bad Header", "x")
            .build();

        assert_eq!(
            response.headers().get("X-Custom-Header"),
            Some(&HeaderValue::from_static("test-value"))
        );
        assert_eq!(
            response.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
        assert_eq!(response.headers().len(), 2);
    }

    #[test]
    fn test_content_type_overrides() {
        let response = ResponseBuilder::new(StatusCode::OK)
            .header("content-type", "text/plain")
            .content_type("application/octet-stream")
            .build();

        assert_eq!(response.headers().get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_merge_headers_with_skip() {
        let mut headers = HeaderMap::new();
        headers.insert("key_a", HeaderValue::from_static("value_a"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));

        let response = ResponseBuilder::new(StatusCode::OK)
            .header("key_b", "value_b")
            .merge_headers(&headers, |name| name == "transfer-encoding")
            .build();

        assert_eq!(response.headers().get("key_a").unwrap(), "value_a");
        assert_eq!(response.headers().get("key_b").unwrap(), "value_b");
        assert!(response.headers().get("transfer-encoding").is_none());
    }
}
