//! Configuration types for the mock server.

mod listen;
mod recording;
mod upstream;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use listen::ListenConfig;
pub use recording::RecordingConfig;
pub use upstream::UpstreamConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(secs) = self.upstream.timeout_secs {
            if secs <= 0.0 || std::time::Duration::try_from_secs_f64(secs).is_err() {
                anyhow::bail!("upstream.timeout_secs must be a positive number of seconds, got {secs}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen.port, 5000);
        assert_eq!(config.listen.socket_addr().to_string(), "0.0.0.0:5000");
        assert!(config.upstream.timeout_secs.is_none());
        assert!(!config.upstream.tls_skip_verify);
        assert!(config.recording.enabled);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
listen:
  host: 127.0.0.1
  port: 8080
upstream:
  timeout_secs: 2.5
  tls_skip_verify: true
recording:
  enabled: false
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listen.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.upstream.timeout_secs, Some(2.5));
        assert!(config.upstream.tls_skip_verify);
        assert_eq!(config.upstream.max_idle_per_host, 16);
        assert!(!config.recording.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("listen:\n  port: 9000\n").unwrap();
        assert_eq!(config.listen.port, 9000);
        assert_eq!(config.listen.host.to_string(), "0.0.0.0");
        assert!(config.recording.enabled);
    }

    #[test]
    fn test_validate_rejects_bad_timeout() {
        let mut config = Config::default();
        config.upstream.timeout_secs = Some(0.0);
        assert!(config.validate().is_err());

        config.upstream.timeout_secs = Some(-3.0);
        assert!(config.validate().is_err());

        config.upstream.timeout_secs = Some(1e20);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen:\n  port: 7070\nupstream:\n  timeout_secs: 1").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.listen.port, 7070);
        assert_eq!(config.upstream.timeout_secs, Some(1.0));
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "upstream:\n  timeout_secs: -1").unwrap();
        assert!(Config::from_file(file.path()).is_err());

        assert!(Config::from_file("/nonexistent/proxy-mock.yaml").is_err());
    }
}
