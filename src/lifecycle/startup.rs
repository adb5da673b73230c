//! Startup orchestration.
//!
//! # Responsibilities
//! - Start background exporters (metrics)
//! - Build the HTTP server from configuration
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::gateway::GatewayError;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("gateway initialization failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the gateway with an already-validated configuration until a
/// termination signal arrives.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::forward_to(&shutdown).await;
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
