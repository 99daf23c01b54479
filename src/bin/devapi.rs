//! Prosel Development API Server
//!
//! Run with: cargo run --bin prosel-devapi
//!
//! Serves the hospital REST contract from memory. Data is lost on restart.
//!
//! # Configuration
//!
//! Read from the usual config file locations (`[devapi]` and `[logging]`),
//! then environment variables:
//! - `PROSEL_DEVAPI_HOST`: Host to bind to (default: 0.0.0.0)
//! - `PROSEL_DEVAPI_PORT`: Port to listen on (default: 3001)
//! - `RUST_LOG`: Log filter (default: the configured level)

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prosel::config::Config;
use prosel::devapi::{serve, AppState};

#[derive(Parser)]
#[command(name = "prosel-devapi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "In-memory development backend for the Prosel dashboard")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("prosel={},tower_http=debug", config.logging.level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Prosel dev API v{}", env!("CARGO_PKG_VERSION"));

    let mut devapi_config = config.devapi_config();
    if let Some(host) = args.host {
        devapi_config.host = host;
    }
    if let Some(port) = args.port {
        devapi_config.port = port;
    }

    let state = AppState::new(devapi_config.clone());
    serve(state, &devapi_config).await?;

    Ok(())
}
