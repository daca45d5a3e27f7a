use std::path::PathBuf;

use clap::Parser;

use product_service::config::{load_config, validate_config, ConfigError, ServiceConfig};
use product_service::lifecycle::{signals, startup, Shutdown};
use product_service::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "product-service")]
#[command(version, about = "In-memory product catalogue over HTTP", long_about = None)]
struct Cli {
    /// HTTP server port (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (overrides the config file; RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        at = ?std::time::SystemTime::now(),
        "product-service starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown.clone());

    if let Err(e) = startup::start(config, server_shutdown).await {
        tracing::error!(error = %e, "Fatal error, exiting");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
