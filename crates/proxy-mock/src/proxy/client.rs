//! HTTP client creation for upstream calls.

use crate::config::UpstreamConfig;
use std::time::Duration;
use tracing::{info, warn};

/// Build the shared client used for proxy delegation.
///
/// No request timeout is applied unless `upstream.timeout_secs` is set: an
/// upstream that never answers keeps the handling task waiting.
pub fn create_http_client(config: &UpstreamConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .pool_max_idle_per_host(config.max_idle_per_host)
        .redirect(reqwest::redirect::Policy::none());

    match config.timeout_secs.map(Duration::try_from_secs_f64) {
        Some(Ok(timeout)) => builder = builder.timeout(timeout),
        Some(Err(e)) => warn!("Ignoring upstream timeout {:?}: {}", config.timeout_secs, e),
        None => {}
    }

    if config.tls_skip_verify {
        warn!("TLS certificate verification DISABLED for upstream hosts (development/testing only)");
        builder = builder.danger_accept_invalid_certs(true);
    }

    let client = builder.build()?;
    info!(
        "Upstream client configured: timeout={}, max_idle_per_host={}",
        config
            .timeout_secs
            .map(|s| format!("{s}s"))
            .unwrap_or_else(|| "none".to_string()),
        config.max_idle_per_host
    );
    Ok(client)
}
