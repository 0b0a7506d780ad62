use anyhow::Context;
use clap::Parser;
use proxy_mock::{Config, MockServer, MockService};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

/// HTTP mock server with upstream proxying and request capture
#[derive(Parser, Debug)]
#[command(name = "proxy-mock")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "PROXY_MOCK_CONFIG")]
    config: Option<String>,

    /// Listen address (overrides the config file)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Listen port (overrides the config file)
    #[arg(short, long, env = "PROXY_MOCK_PORT")]
    port: Option<u16>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "PROXY_MOCK_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Config::from_file(path).with_context(|| format!("failed to load config {path}"))?
        }
        None => Config::default(),
    };
    if let Some(host) = args.host {
        config.listen.host = host;
    }
    if let Some(port) = args.port {
        config.listen.port = port;
    }

    let service = Arc::new(MockService::from_config(&config)?);
    let server = MockServer::bind(config.listen.socket_addr(), service).await?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
}
