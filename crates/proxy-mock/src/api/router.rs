//! Route dispatch for the mock server.
//!
//! Control endpoints are matched first on `(method, path)`. Everything else
//! served by the catch-all methods goes to the mock dispatcher; the rest falls
//! back to a recorded 404.

use crate::api::handlers::{mocks, params, storage, system};
use crate::mock::BodyEncoding;
use crate::request::InboundRequest;
use crate::response::json_error;
use crate::service::MockService;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Methods handed to the mock dispatcher.
const DISPATCH_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
];

/// Main request router
pub async fn route_request(
    req: Request<Incoming>,
    service: Arc<MockService>,
    client_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return Ok(json_error(StatusCode::BAD_REQUEST, "Failed to read request body"));
        }
    };

    let mut inbound = InboundRequest::new(parts.method, parts.uri).with_body(body);
    inbound.headers = parts.headers;
    inbound.client_addr = Some(client_addr);

    debug!("{} {} from {}", inbound.method, inbound.path(), client_addr);

    Ok(route(&inbound, &service).await)
}

/// Route a buffered request.
pub async fn route(req: &InboundRequest, service: &MockService) -> Response<Full<Bytes>> {
    match (&req.method, req.path()) {
        (&Method::GET, "/status") => return system::handle_status(),
        (&Method::POST, "/configure_mock") => {
            return mocks::handle_configure(req, BodyEncoding::Text, service)
        }
        (&Method::POST, "/configure_mock/binary") => {
            return mocks::handle_configure(req, BodyEncoding::Base64, service)
        }
        (&Method::GET, "/storage") => return storage::handle_get(req, service),
        (&Method::POST, "/cleanup_storage") => return storage::handle_cleanup(req, service),
        (&Method::GET, "/mock_params") => return params::handle_get(service),
        (&Method::POST, "/cleanup_params") => return params::handle_cleanup(service),
        _ => {}
    }

    if req.path() == "/" || !DISPATCH_METHODS.contains(&req.method) {
        return service.not_found(req);
    }

    let (outcome, response) = service.dispatch(req).await;
    debug!("{} {} -> {:?}", req.method, req.path(), outcome);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBody, MockEntry};
    use crate::proxy::HttpProxyDelegate;
    use hyper::Uri;
    use serde_json::Value;

    fn service() -> MockService {
        MockService::new(Arc::new(HttpProxyDelegate::new(reqwest::Client::new())))
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_control_routes_are_not_recorded() {
        let service = service();
        let req = InboundRequest::new(Method::GET, Uri::from_static("/status"));
        let resp = route(&req, &service).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(service.recorder().is_empty());
    }

    #[tokio::test]
    async fn test_mock_path_dispatches() {
        let service = service();
        service
            .registry()
            .register(MockEntry::new("/orders").with_body(MockBody::Text("[]".into())))
            .unwrap();

        let req = InboundRequest::new(Method::PATCH, Uri::from_static("/orders"));
        let resp = route(&req, &service).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(service.recorder().len(), 1);
    }

    #[tokio::test]
    async fn test_miss_reports_path() {
        let service = service();
        let req = InboundRequest::new(Method::GET, Uri::from_static("/missing/thing"));
        let resp = route(&req, &service).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "Mock not found: /missing/thing");
    }

    #[tokio::test]
    async fn test_root_and_unserved_methods_fall_back() {
        let service = service();

        let req = InboundRequest::new(Method::GET, Uri::from_static("/"));
        let resp = route(&req, &service).await;
        assert_eq!(body_json(resp).await["error"], "Not found");

        let req = InboundRequest::new(Method::TRACE, Uri::from_static("/orders"));
        let resp = route(&req, &service).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "Not found");

        assert_eq!(service.recorder().len(), 2);
    }

    #[tokio::test]
    async fn test_control_path_with_other_method_dispatches() {
        let service = service();
        let req = InboundRequest::new(Method::GET, Uri::from_static("/configure_mock"));
        let resp = route(&req, &service).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "Mock not found: /configure_mock");
    }
}
