//! user-gateway
//!
//! A small HTTP gateway that forwards client requests to the downstream
//! user service through a resilient HTTP client.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌─────────────────────────────────────────────┐
//!                   │                USER GATEWAY                  │
//!                   │                                              │
//!   Client Request  │  ┌────────┐    ┌──────────────────────────┐ │
//!   ────────────────┼─▶│  http  │───▶│   DownstreamClient        │ │
//!                   │  │ server │    │  interceptors → transport │ │
//!                   │  └────────┘    │  → classifier → retry     │ │
//!                   │       ▲        └────────────┬─────────────┘ │
//!   Client Response │       │                     │               │     Downstream
//!   ◀───────────────┼───────┴── error translation ┴───────────────┼──── user service
//!                   │                                              │
//!                   │  config · observability · lifecycle          │
//!                   └─────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use user_gateway::config::load_or_default;
use user_gateway::lifecycle::{self, Shutdown};
use user_gateway::observability::{logging, metrics};
use user_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "user-gateway")]
#[command(about = "HTTP gateway over the downstream user service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (built-in defaults when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        downstream = %config.downstream.base_url,
        max_retries = config.retries.max_retries,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
