//! Job-board tracking & admission service.
//!
//! Serves the analytics-tracking endpoints of a job-board: view counts,
//! application counts, and exam participant counts. Every request passes
//! origin validation and a per-client rate limit before it can touch a
//! counter; counter updates are atomic in the configured store.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobpulse::config::{load_config, StorageBackend, TrackerConfig};
use jobpulse::http::HttpServer;
use jobpulse::lifecycle::Shutdown;
use jobpulse::observability::metrics;
use jobpulse::store::memory::MemoryStore;
use jobpulse::store::redis::RedisStore;
use jobpulse::store::CounterStore;

#[derive(Parser)]
#[command(name = "jobpulse", about = "Job-board tracking & admission service")]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TrackerConfig::default(),
    };

    // Initialize tracing subscriber; RUST_LOG wins over the config level.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "jobpulse={},tower_http=info",
                config.observability.log_level
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        storage = ?config.storage.backend,
        allowed_origins = config.origins.allowed.len(),
        read_limit = config.rate_limit.read.max_requests,
        write_limit = config.rate_limit.write.max_requests,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store: Arc<dyn CounterStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory counter store; counts reset on restart");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::Redis => Arc::new(RedisStore::connect(&config.storage.redis_url).await?),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config, store);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
