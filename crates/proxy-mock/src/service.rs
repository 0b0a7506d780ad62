//! The mock service: registry, request recorder and proxy delegate for one
//! server instance, plus the catch-all dispatch.
//!
//! The service is built once at startup and shared with the HTTP layer as an
//! `Arc<MockService>`. Independent instances share nothing, which is what the
//! tests rely on.

use crate::config::Config;
use crate::mock::{MockEntry, Registry};
use crate::proxy::{create_http_client, HttpProxyDelegate, ProxyDelegate};
use crate::recording::{RequestRecord, RequestRecorder};
use crate::request::InboundRequest;
use crate::response::{json_error, respond};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use std::sync::Arc;
use tracing::{info, warn};

/// Terminal state of one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    NoMatch,
    MatchedLocal,
    MatchedProxy,
}

impl DispatchOutcome {
    fn classify(entry: Option<&MockEntry>) -> Self {
        match entry {
            None => DispatchOutcome::NoMatch,
            Some(e) if e.proxy_host.is_some() => DispatchOutcome::MatchedProxy,
            Some(_) => DispatchOutcome::MatchedLocal,
        }
    }
}

pub struct MockService {
    registry: Registry,
    recorder: RequestRecorder,
    proxy: Arc<dyn ProxyDelegate>,
}

impl MockService {
    pub fn new(proxy: Arc<dyn ProxyDelegate>) -> Self {
        Self::with_recorder(RequestRecorder::new(), proxy)
    }

    pub fn with_recorder(recorder: RequestRecorder, proxy: Arc<dyn ProxyDelegate>) -> Self {
        Self {
            registry: Registry::new(),
            recorder,
            proxy,
        }
    }

    /// Build a service with the `reqwest`-backed proxy delegate.
    pub fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        let client = create_http_client(&config.upstream)?;
        let recorder = RequestRecorder::with_enabled(config.recording.enabled);
        if !recorder.is_enabled() {
            info!("Request recording disabled");
        }
        Ok(Self::with_recorder(
            recorder,
            Arc::new(HttpProxyDelegate::new(client)),
        ))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn recorder(&self) -> &RequestRecorder {
        &self.recorder
    }

    /// Resolve an inbound request against the registry and reply.
    ///
    /// Every request is recorded exactly once; a match attaches the mock's
    /// `extra_info`.
    pub async fn dispatch(&self, req: &InboundRequest) -> (DispatchOutcome, Response<Full<Bytes>>) {
        let entry = self.registry.get(req.path());
        let outcome = DispatchOutcome::classify(entry.as_ref());

        let record = RequestRecord::capture(req);
        let Some(entry) = entry else {
            self.recorder.append(record);
            warn!("Mock not found: {}", req.path());
            let message = format!("Mock not found: {}", req.path());
            return (outcome, json_error(StatusCode::NOT_FOUND, &message));
        };

        self.recorder
            .append(record.with_extra_info(entry.extra_info.clone()));
        info!("Matched mock {} ({:?})", entry.path, outcome);

        let response = respond(&entry, req, self.proxy.as_ref()).await;
        (outcome, response)
    }

    /// Record a request that no route serves and answer 404.
    pub fn not_found(&self, req: &InboundRequest) -> Response<Full<Bytes>> {
        warn!("Path not found: {} {}", req.method, req.path());
        self.recorder.append(RequestRecord::capture(req));
        json_error(StatusCode::NOT_FOUND, "Not found")
    }
}
