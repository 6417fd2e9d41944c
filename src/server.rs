//! HTTP server initialization and runtime setup.
//!
//! Builds the recent predictions store, the estimator service and the Axum
//! server lifecycle.

use crate::application::services::EstimatorService;
use crate::config::Config;
use crate::infrastructure::recent::{InMemoryRecentStore, NullRecentStore, RecentStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Recent predictions store (in-memory, or NullRecentStore when disabled)
/// - Estimator service with the configured presets and seed
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The estimator self-check fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let recent_store: Arc<dyn RecentStore> = if config.is_history_enabled() {
        tracing::info!(
            "Recent predictions enabled (capacity {})",
            config.recent_capacity
        );
        Arc::new(InMemoryRecentStore::new(config.recent_capacity))
    } else {
        tracing::info!("Recent predictions disabled (NullRecentStore)");
        Arc::new(NullRecentStore::new())
    };

    let service = EstimatorService::new(
        config.yield_preset,
        config.soil_preset,
        config.jitter_seed,
        recent_store,
    );
    service.self_check()?;
    tracing::info!("Estimator self-check passed");

    let state = AppState::new(Arc::new(service));

    let app = app_router(
        state,
        config.rate_limit_per_second,
        config.rate_limit_burst,
    )?;

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
