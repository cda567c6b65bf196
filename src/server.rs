//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, click worker startup, the Axum
//! server lifecycle and the drain of queued clicks on shutdown.

use crate::config::Config;
use crate::domain::click_dispatcher::ClickDispatcher;
use crate::domain::click_worker::ClickWorkerPool;
use crate::infrastructure::persistence::{self, SqliteClickRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Click channel and worker pool
/// - Axum HTTP server
///
/// On Ctrl-C or SIGTERM the server stops accepting requests, then the click
/// workers drain the queue for at most `SHUTDOWN_DRAIN_TIMEOUT_SECS`.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = persistence::connect(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    persistence::run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    let pool = Arc::new(pool);

    let (click_dispatcher, click_rx) =
        ClickDispatcher::channel(config.click_queue_capacity, config.click_enqueue_policy);
    let click_repository = Arc::new(SqliteClickRepository::new(pool.clone()));
    let workers = ClickWorkerPool::spawn(config.click_worker_count, click_rx, click_repository);

    let state = AppState::new(pool.clone(), click_dispatcher, config.base_url.clone());
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let served = axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    tracing::info!("HTTP server stopped, draining click queue");
    if tokio::time::timeout(config.shutdown_drain_timeout(), workers.shutdown())
        .await
        .is_err()
    {
        tracing::warn!("Click queue drain timed out, remaining click events are lost");
    }

    pool.close().await;

    served.context("HTTP server error")
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
