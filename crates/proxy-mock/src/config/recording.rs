//! Request capture configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordingConfig {
    /// Capture inbound request parameters for `/mock_params`.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}
