//! Wallet Gateway
//!
//! Sits between wallet clients and a blockchain node: signs transfer
//! requests with the caller's key pair and forwards them to the node.
//!
//! # Architecture Overview
//!
//! ```text
//!     Wallet client          ┌──────────────────────── WALLET GATEWAY ─────────────────────────┐
//!     ──────────────────────▶│ http ─▶ gateway::service                                        │
//!     POST /transaction      │            │                                                    │
//!     GET  /wallet/amount    │            ├─▶ blockchain::transaction (validate, parse value)  │
//!                            │            ├─▶ blockchain::wallet      (resolve P-256 keys)     │
//!                            │            ├─▶ blockchain::transaction (canonical bytes, sign)  │
//!                            │            └─▶ blockchain::client ─────────────────────────────┼──▶ node
//!                            │                                        POST /transactions       │   /transactions
//!                            │                                        GET  /amount             │   /amount
//!                            └─────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use wallet_gateway::config::loader::read_config;
use wallet_gateway::config::{validate_config, ConfigError, GatewayConfig};
use wallet_gateway::observability::{logging, metrics};
use wallet_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "wallet-gateway")]
#[command(about = "Signs wallet transfer requests and forwards them to a blockchain node", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides listener.port).
    #[arg(short, long)]
    port: Option<u16>,

    /// Blockchain node base URL (overrides node.gateway_url).
    #[arg(short, long)]
    gateway: Option<String>,
}

fn resolve_config(args: &Args) -> Result<GatewayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => GatewayConfig::default(),
    };

    if let Some(port) = args.port {
        config.listener.port = port;
    }
    if let Some(gateway) = &args.gateway {
        config.node.gateway_url = gateway.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_logging(&config.observability);

    tracing::info!("wallet-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        gateway_url = %config.node.gateway_url,
        node_timeout_secs = config.node.request_timeout_secs,
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

    let listener = TcpListener::bind(config.listener.bind_address()).await?;

    // Signals drive shutdown for the binary; the trigger is never fired here.
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
