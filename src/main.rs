//! Chat Insights Backend Gateway
//!
//! Presents one stable endpoint to the dashboard while hiding a small ordered
//! list of interchangeable analysis backends.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                  GATEWAY                     │
//!   GET /health       │  ┌────────┐   ┌─────────┐   ┌────────────┐   │
//!   POST /upload ─────┼─▶│  http  │──▶│ gateway │──▶│ resilience │───┼──▶ backend 1 (primary)
//!                     │  │ server │   │ health/ │   │ failover + │   │
//!   JSON response ◀───┼──│response│◀──│ upload  │◀──│  deadline  │───┼──▶ backend 2 (fallback)
//!                     │  └────────┘   └─────────┘   └────────────┘   │
//!                     │                                              │
//!                     │  config · observability · lifecycle          │
//!                     └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use chat_insights_gateway::config::load_config;
use chat_insights_gateway::lifecycle::startup;
use chat_insights_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "chat-insights-gateway")]
#[command(about = "Backend gateway for the chat insights dashboard", long_about = None)]
struct Args {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    logging::init(&config.observability);

    tracing::info!("chat-insights-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backends = ?config.backends.urls,
        health_probe_ms = config.timeouts.health_probe_ms,
        upload_ms = config.timeouts.upload_ms,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
