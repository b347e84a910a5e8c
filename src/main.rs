//! FoodExpress Offline Worker
//!
//! Main entry point that wires all crates together and runs the worker
//! event loop: installs the static cache, activates, then processes
//! events from the hosting environment until shutdown.

use tokio::sync::{mpsc, watch};
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use foodexpress_agent::{EventDispatcher, WorkerRunner, build_state};
use foodexpress_core::config::AppConfig;
use foodexpress_core::error::AppError;
use foodexpress_core::events::WorkerEvent;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Worker error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("FOODEXPRESS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main worker run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FoodExpress worker v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Build worker state ───────────────────────────────
    let state = build_state(config).await?;
    let dispatcher = EventDispatcher::new(state);

    // ── Step 2: Install + activate ───────────────────────────────
    // A failed install leaves the static cache unpublished; the worker
    // keeps running and serves whatever the network still provides.
    if let Err(e) = dispatcher.dispatch(WorkerEvent::Install).await {
        tracing::warn!("Install did not complete: {}", e);
    } else if let Err(e) = dispatcher.dispatch(WorkerEvent::Activate).await {
        tracing::warn!("Activate did not complete: {}", e);
    }

    // ── Step 3: Event loop ───────────────────────────────────────
    let (event_tx, event_rx) = mpsc::channel::<WorkerEvent>(64);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let runner = WorkerRunner::new(dispatcher);
    let loop_handle = tokio::spawn(async move {
        runner.run(event_rx, shutdown_rx).await;
    });

    tracing::info!("FoodExpress worker ready");

    // ── Step 4: Graceful shutdown ────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping worker...");
    let _ = shutdown_tx.send(true);
    drop(event_tx);

    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), loop_handle).await;

    tracing::info!("FoodExpress worker shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
