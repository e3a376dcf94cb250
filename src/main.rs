//! CraftSoft edge server.
//!
//! Serves the CraftSoft static site tree and emulates its subdomains.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                     EDGE SERVER                       │
//!                     │                                                       │
//!   Client Request    │  ┌─────────┐    ┌───────────┐    ┌──────────────┐    │
//!   ──────────────────┼─▶│  http   │───▶│  routing  │───▶│    assets    │────┼──▶ Directory
//!                     │  │ server  │    │ hostname  │    │ dir | origin │    │    or Origin
//!                     │  └─────────┘    │  router   │    └──────┬───────┘    │
//!                     │                 └───────────┘           │            │
//!   Client Response   │  ┌──────────┐                           │            │
//!   ◀─────────────────┼──│ response │◀──────────────────────────┘            │
//!                     │  │ shaping  │                                        │
//!                     │  └──────────┘                                        │
//!                     │  ┌────────────────────────────────────────────────┐  │
//!                     │  │ config (+watcher) │ observability │ lifecycle  │  │
//!                     │  └────────────────────────────────────────────────┘  │
//!                     └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use craftsoft_edge::config::{load_config, validation::validate_config, watcher::ConfigWatcher};
use craftsoft_edge::lifecycle::signals::shutdown_on_signal;
use craftsoft_edge::net::load_tls_config;
use craftsoft_edge::observability::{logging, metrics};
use craftsoft_edge::{EdgeConfig, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "craftsoft-edge")]
#[command(about = "Subdomain-aware edge server for the CraftSoft static site", long_about = None)]
struct Cli {
    /// Configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(|errors| {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })?;
    }

    if cli.check {
        println!("configuration OK");
        return Ok(());
    }

    logging::init_logging(&config.observability)?;
    tracing::info!("craftsoft-edge v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    // Keep the watcher alive for the lifetime of the server.
    let (config_updates, _watcher) = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (updates, Some(watcher.run()?))
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown_on_signal(shutdown));

    let tls = config.listener.tls.clone();
    let server = HttpServer::new(config)?;

    match tls {
        Some(tls) => {
            let tls_config = load_tls_config(&tls).await?;
            server.run_tls(tls_config, config_updates, server_shutdown).await?;
        }
        None => {
            let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");
            server.run(listener, config_updates, server_shutdown).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
