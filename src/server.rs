//! HTTP service exposing the analyzer.

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::analysis::CommitAnalyzer;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The analyzer and its cache.
    pub analyzer: Arc<CommitAnalyzer>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
    /// Whether a config file was read at startup.
    pub config_loaded: bool,
}

impl AppState {
    /// Creates state for a freshly started service.
    pub fn new(analyzer: Arc<CommitAnalyzer>, config_loaded: bool) -> Self {
        Self {
            analyzer,
            started_at: Instant::now(),
            config_loaded,
        }
    }
}

/// Builds the router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health))
        .route("/analyze-commit", post(routes::analyze_commit))
        .route("/capabilities", get(routes::capabilities))
        .route("/cache", delete(routes::clear_cache))
        .route("/stats", get(routes::stats))
        .with_state(state)
}

/// Serves requests on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!(%addr, "Commit analyzer listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
