//! Wanderlust server: travel listings behind a session-backed middleware pipeline.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use tokio::sync::broadcast;
use tracing_subscriber::{EnvFilter, fmt};

use wanderlust_api::state::Repositories;
use wanderlust_api::{AppState, build_app};
use wanderlust_auth::{LoggingObserver, SessionCleanup};
use wanderlust_core::config::{AppConfig, StoreProvider};
use wanderlust_core::error::AppError;
use wanderlust_database::{DatabasePool, MemoryDatabase};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load `.env` outside production, then the layered configuration.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("WANDERLUST_ENV").unwrap_or_else(|_| "development".to_string());

    if env != "production" {
        // A missing .env file is fine; variables may come from the shell.
        let _ = dotenvy::dotenv();
    }

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
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Wanderlust v{}", env!("CARGO_PKG_VERSION"));

    // ── Storage ──────────────────────────────────────────────
    let (repos, pool) = match config.session.store {
        StoreProvider::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            wanderlust_database::migration::run_migrations(pool.pool()).await?;
            (Repositories::postgres(&pool), Some(pool))
        }
        StoreProvider::Memory => {
            tracing::warn!("Using the in-memory store; all data is lost on restart");
            (Repositories::in_memory(Arc::new(MemoryDatabase::new())), None)
        }
    };

    // ── State ────────────────────────────────────────────────
    let cleanup_minutes = config.session.cleanup_interval_minutes;
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let bind_addr = config.server.bind_address();

    let state = AppState::new(config, repos, Arc::new(LoggingObserver))?;

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let cleanup_handle =
        SessionCleanup::new(Arc::clone(&state.session_store), cleanup_minutes).spawn(shutdown_rx);

    // ── HTTP server ──────────────────────────────────────────
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {bind_addr}: {e}")))?;

    tracing::info!("Serving on http://{}", bind_addr);

    axum::serve(
        listener,
        axum::ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Shutdown ─────────────────────────────────────────────
    tracing::info!("Shutting down...");

    let _ = shutdown_tx.send(());
    if tokio::time::timeout(grace, cleanup_handle).await.is_err() {
        tracing::warn!("Session cleanup did not stop within {}s", grace.as_secs());
    }

    if let Some(pool) = pool {
        pool.close().await;
    }

    tracing::info!("Wanderlust shut down gracefully");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
