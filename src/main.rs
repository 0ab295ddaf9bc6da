//! Product Catalog Server
//!
//! A small server-rendered product catalog built with Tokio, Axum and minijinja.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────────────┐
//!                      │                   PRODUCT CATALOG                     │
//!                      │                                                       │
//!   Browser (htmx)     │  ┌──────────┐    ┌──────────┐    ┌────────────────┐   │
//!   ───────────────────┼─▶│  http    │───▶│ handlers │───▶│ catalog service│   │
//!                      │  │  server  │    │          │    │ (single owner) │   │
//!                      │  └──────────┘    └────┬─────┘    └───────┬────────┘   │
//!                      │                       │   PageView       │            │
//!                      │                       │◀─────────────────┘            │
//!                      │                       ▼                               │
//!   HTML + hx-* hdrs   │                 ┌──────────┐                          │
//!   ◀──────────────────┼─────────────────│  render  │                          │
//!                      │                 └──────────┘                          │
//!                      │                                                       │
//!                      │  Cross-cutting: config, observability, lifecycle      │
//!                      └───────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use product_catalog::config::{load_config, validate_config, CatalogConfig, ConfigError};
use product_catalog::observability::{logging, metrics};
use product_catalog::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "product-catalog")]
#[command(about = "Server-rendered product catalog", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the log level.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn load(&self) -> Result<CatalogConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => CatalogConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    logging::init_logging(&config.observability);
    tracing::info!("product-catalog v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        seed_products = config.catalog.seed.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    // Templates load here; a broken template stops startup before binding
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
