//! order-hook
//!
//! Receives PayPal payment webhooks, normalizes each event into an order
//! record, and serves the latest record per order over a small JSON API.
//!
//! # Architecture Overview
//!
//! ```text
//!   PayPal ──POST /api/webhook/paypal──▶ ┌──────────────┐    ┌──────────────┐
//!                                         │   webhook    │───▶│  OrderStore  │
//!                                         │ decode/ id / │    │ (in-memory)  │
//!                                         │   status     │    └──────┬───────┘
//!                                         └──────────────┘           │
//!   Frontend ──GET /api/orders[/{id}]──────────────────────────────────┘
//!            ──GET /api/health
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use order_hook::config::load_config;
use order_hook::lifecycle::{wait_for_signal, Shutdown, StopReason};
use order_hook::observability::{logging, metrics};
use order_hook::HttpServer;

#[derive(Parser)]
#[command(name = "order-hook")]
#[command(about = "PayPal webhook receiver and order status API", long_about = None)]
struct Args {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long, env = "ORDER_HOOK_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.service.environment,
        "order-hook starting"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let base_url = config.base_url();
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    tracing::info!("Webhook endpoint: {}/api/webhook/paypal", base_url);
    tracing::info!("Health check: {}/api/health", base_url);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.listener();
    let server = HttpServer::new(config);

    let mut server_task = tokio::spawn(server.run(listener, server_shutdown));

    tokio::select! {
        _ = wait_for_signal() => {
            shutdown.stop(StopReason::Signal);
            server_task.await??;
        }
        res = &mut server_task => res??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
