//! Outbound call to an upstream host for proxied mocks.
//!
//! The dispatcher only decides *whether* and *where* to proxy; the call itself
//! goes through a [`ProxyDelegate`], so tests can swap in a local stand-in.

use super::headers::forwardable_request_headers;
use crate::request::InboundRequest;
use async_trait::async_trait;
use bytes::Bytes;
use hyper::{HeaderMap, StatusCode};
use tracing::debug;

/// Status, headers and raw body returned by the upstream.
#[derive(Debug, Clone)]
pub struct ProxyReply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Invalid upstream URL {0}")]
    InvalidUrl(String),
    #[error("Failed to send proxy request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read upstream response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait ProxyDelegate: Send + Sync {
    /// Forward `req` to `host` and return the upstream reply verbatim.
    async fn forward(&self, host: &str, req: &InboundRequest) -> Result<ProxyReply, ProxyError>;
}

/// Build the upstream URL: host base, then the inbound path (still encoded)
/// and query.
pub fn target_url(host: &str, req: &InboundRequest) -> String {
    format!(
        "{}{}{}",
        host.trim_end_matches('/'),
        req.raw_path(),
        req.query().map(|q| format!("?{q}")).unwrap_or_default()
    )
}

/// Default delegate backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpProxyDelegate {
    client: reqwest::Client,
}

impl HttpProxyDelegate {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProxyDelegate for HttpProxyDelegate {
    async fn forward(&self, host: &str, req: &InboundRequest) -> Result<ProxyReply, ProxyError> {
        let url = target_url(host, req);
        let parsed = reqwest::Url::parse(&url).map_err(|_| ProxyError::InvalidUrl(url.clone()))?;

        debug!("Proxy request to: {}", url);

        let response = self
            .client
            .request(req.method.clone(), parsed)
            .headers(forwardable_request_headers(&req.headers))
            .body(req.body.clone())
            .send()
            .await
            .map_err(|source| ProxyError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| ProxyError::Body { url, source })?;

        Ok(ProxyReply {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{Method, Uri};

    #[test]
    fn test_target_url_keeps_path_and_query() {
        let req = InboundRequest::new(Method::GET, Uri::from_static("/api/users?page=2"));
        assert_eq!(
            target_url("http://upstream:8080/", &req),
            "http://upstream:8080/api/users?page=2"
        );

        let req = InboundRequest::new(Method::GET, Uri::from_static("/health"));
        assert_eq!(target_url("http://upstream", &req), "http://upstream/health");

        let req = InboundRequest::new(Method::GET, Uri::from_static("/users/a%20b"));
        assert_eq!(target_url("http://upstream", &req), "http://upstream/users/a%20b");
    }

    #[tokio::test]
    async fn test_invalid_host_is_reported() {
        let delegate = HttpProxyDelegate::new(reqwest::Client::new());
        let req = InboundRequest::new(Method::GET, Uri::from_static("/x"));
        let err = delegate.forward("not a url", &req).await.unwrap_err();
        assert!(matches!(err, ProxyError::InvalidUrl(_)));
    }
}
