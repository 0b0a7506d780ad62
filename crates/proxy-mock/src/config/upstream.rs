//! Upstream client configuration for proxied mocks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Overall timeout for one upstream call, in seconds. Unset means the
    /// handler waits as long as the upstream takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<f64>,
    /// Skip TLS certificate verification (for self-signed certs in dev/test)
    #[serde(default)]
    pub tls_skip_verify: bool,
    #[serde(default = "default_max_idle_per_host")]
    pub max_idle_per_host: usize,
}

fn default_max_idle_per_host() -> usize {
    16
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            tls_skip_verify: false,
            max_idle_per_host: default_max_idle_per_host(),
        }
    }
}
