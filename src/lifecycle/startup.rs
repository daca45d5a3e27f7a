//! Startup orchestration.
//!
//! Subsystems initialize in order, not concurrently. The listener binds last.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::repository::{InMemoryProductRepository, ProductRepository};

/// Fatal errors during startup or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("can't listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("metrics exporter failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build every subsystem from `config` and serve until `shutdown` fires.
pub async fn start(
    config: ServiceConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let repository: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let server = HttpServer::new(config, repository);
    server.run(listener, shutdown).await.map_err(StartupError::Serve)
}
