//! # Tally API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally API Server                                 │
//! │                                                                         │
//! │  Client ───► HTTP (8000) ───► Routes ───► FileStore (./files)          │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                          InvoiceCalculator                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tally_api::{router, ApiConfig, AppState};
use tally_store::{FileStore, StoreConfig};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Tally API server...");

    // Load configuration
    let config = ApiConfig::load().context("failed to load configuration")?;
    info!(
        port = config.http_port,
        files_dir = %config.files_dir.display(),
        "Configuration loaded"
    );

    // Open the document store
    let store = FileStore::open(
        StoreConfig::new(&config.files_dir).create_if_missing(config.create_files_dir),
    )
    .await
    .context("failed to open files directory")?;

    let app = router(AppState::new(store));

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
