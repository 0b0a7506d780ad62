//! Turning a matched mock into the reply sent to the client.

use super::builder::ResponseBuilder;
use crate::mock::{MockBody, MockEntry};
use crate::proxy::{is_hop_by_hop, MockHeadersExt, ProxyDelegate, ProxyReply, VALUE_PROXIED, X_PROXY_MOCK};
use crate::request::InboundRequest;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::{error, info};

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Produce the reply for a matched mock.
///
/// Proxying takes precedence over the timeout and the local body. The delay
/// is a plain `tokio::time::sleep` on this request's task; the entry is an
/// owned copy, so no registry lock is held while waiting.
pub async fn respond(
    entry: &MockEntry,
    req: &InboundRequest,
    proxy: &dyn ProxyDelegate,
) -> Response<Full<Bytes>> {
    if let Some(host) = &entry.proxy_host {
        info!("Proxying request {} to {}", req.path(), host);
        return match proxy.forward(host, req).await {
            Ok(reply) => {
                info!("Received upstream response {} for {}", reply.status, req.path());
                render_proxy_reply(reply)
            }
            Err(e) => {
                error!("Proxy request failed: {}", e);
                super::json_error(StatusCode::BAD_GATEWAY, &e.to_string())
            }
        };
    }

    if let Some(delay) = entry.delay() {
        info!(
            "Timeout set for {}: sleeping {:.3}s before responding",
            req.path(),
            delay.as_secs_f64()
        );
        tokio::time::sleep(delay).await;
    }

    render_local(entry)
}

/// Render the entry's own status, headers and body.
pub fn render_local(entry: &MockEntry) -> Response<Full<Bytes>> {
    let builder = ResponseBuilder::with_status_code(entry.status_code).headers(&entry.headers);

    match &entry.body {
        MockBody::None => builder.build(),
        MockBody::Text(text) => builder.body(text.clone()).build(),
        MockBody::Binary(bytes) => builder.body(bytes.clone()).content_type(OCTET_STREAM).build(),
    }
}

/// Rebuild an upstream reply: status and raw body verbatim, headers minus
/// hop-by-hop ones, plus the proxied marker.
pub fn render_proxy_reply(reply: ProxyReply) -> Response<Full<Bytes>> {
    let mut response = ResponseBuilder::new(reply.status)
        .merge_headers(&reply.headers, |name| {
            is_hop_by_hop(name) || *name == hyper::header::CONTENT_LENGTH
        })
        .body(reply.body)
        .build();
    response.set_header(&X_PROXY_MOCK, &VALUE_PROXIED);
    response
}
