//! HTTP server for the mock endpoints.

use crate::api::router::route_request;
use crate::service::MockService;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Mock server bound to one listener.
pub struct MockServer {
    listener: TcpListener,
    service: Arc<MockService>,
}

impl MockServer {
    /// Bind a listener on `addr`. Port 0 picks a free port.
    pub async fn bind(addr: SocketAddr, service: Arc<MockService>) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self::from_listener(listener, service))
    }

    pub fn from_listener(listener: TcpListener, service: Arc<MockService>) -> Self {
        Self { listener, service }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run until the process exits.
    pub async fn run(self) -> Result<(), anyhow::Error> {
        self.run_until(std::future::pending()).await
    }

    /// Accept connections until `shutdown` resolves. Connections already in
    /// flight keep running on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), anyhow::Error>
    where
        F: Future<Output = ()>,
    {
        info!("Mock server listening on http://{}", self.local_addr()?);
        tokio::pin!(shutdown);

        loop {
            let (stream, client_addr) = tokio::select! {
                accepted = self.listener.accept() => accepted?,
                _ = &mut shutdown => {
                    info!("Mock server shutting down");
                    return Ok(());
                }
            };
            let io = TokioIo::new(stream);
            let service = Arc::clone(&self.service);

            tokio::spawn(async move {
                let svc = service_fn(move |req| {
                    let service = Arc::clone(&service);
                    async move { route_request(req, service, client_addr).await }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, svc).await {
                    debug!("Connection error from {}: {}", client_addr, e);
                }
            });
        }
    }
}
