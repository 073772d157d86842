//! Route handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use super::error::ApiError;
use super::AppState;
use crate::data::{AnalysisResult, CommitRecord};
use crate::utils::format_uptime;

const SERVICE_NAME: &str = "commit-analyzer";
const SERVICE_DESCRIPTION: &str = "Commit analysis and reporting";
const CAPABILITIES: &[&str] = &[
    "commit_analysis",
    "quality_scoring",
    "report_generation",
    "issue_identification",
    "recommendation_generation",
];

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Time since startup.
    pub uptime: String,
    /// Whether a config file was read.
    pub config_loaded: bool,
}

/// Body of `GET /capabilities`.
#[derive(Debug, Serialize)]
pub struct CapabilitiesResponse {
    /// Service name.
    pub name: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Supported capabilities.
    pub capabilities: &'static [&'static str],
    /// Whether AI insights are requested.
    pub ai_enabled: bool,
    /// Model used for AI insights.
    pub ai_model: Option<String>,
    /// Backend serving AI insights (`OpenAI` or `Ollama`).
    pub ai_provider: Option<String>,
    /// Response token budget for AI insights.
    pub ai_max_tokens: Option<usize>,
    /// Cached analyses.
    pub cache_size: usize,
    /// Maximum cached analyses.
    pub cache_capacity: usize,
}

/// Body of `DELETE /cache`.
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    /// Human-readable summary.
    pub message: String,
    /// Number of entries removed.
    pub entries_removed: usize,
}

/// Body of `GET /stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Time since startup.
    pub uptime: String,
    /// Cached analyses.
    pub cache_size: usize,
    /// Whether AI insights are requested.
    pub ai_enabled: bool,
    /// Whether a config file was read.
    pub config_loaded: bool,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: crate::VERSION,
        uptime: format_uptime(state.started_at.elapsed()),
        config_loaded: state.config_loaded,
    })
}

pub(crate) async fn analyze_commit(
    State(state): State<AppState>,
    payload: Result<Json<CommitRecord>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(record) = payload?;
    record.validate().map_err(ApiError::Validation)?;

    info!(
        commit = %record.commit_hash,
        repository = %record.repository_name,
        "Analyzing commit"
    );

    // Detached so a client disconnect does not abort the analysis halfway;
    // the result still lands in the cache.
    let analyzer = Arc::clone(&state.analyzer);
    let result = tokio::spawn(async move { analyzer.analyze(&record).await })
        .await
        .map_err(|e| ApiError::Internal(format!("Analysis failed: {e}")))?;

    Ok(Json(result))
}

pub(crate) async fn capabilities(State(state): State<AppState>) -> Json<CapabilitiesResponse> {
    let metadata = state.analyzer.augmenter().metadata();
    let cache = state.analyzer.cache();
    Json(CapabilitiesResponse {
        name: SERVICE_NAME,
        version: crate::VERSION,
        description: SERVICE_DESCRIPTION,
        capabilities: CAPABILITIES,
        ai_enabled: metadata.is_some(),
        ai_max_tokens: metadata.as_ref().map(|m| m.max_response_length),
        ai_provider: metadata.as_ref().map(|m| m.provider.clone()),
        ai_model: metadata.map(|m| m.model),
        cache_size: cache.len(),
        cache_capacity: cache.capacity(),
    })
}

pub(crate) async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let removed = state.analyzer.cache().clear();
    info!(entries_removed = removed, "Cleared analysis cache");
    Json(ClearCacheResponse {
        message: format!("Cache cleared. {removed} entries removed."),
        entries_removed: removed,
    })
}

pub(crate) async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        uptime: format_uptime(state.started_at.elapsed()),
        cache_size: state.analyzer.cache().len(),
        ai_enabled: state.analyzer.augmenter().is_enabled(),
        config_loaded: state.config_loaded,
    })
}
