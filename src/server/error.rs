//! HTTP error responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP callers as `{"detail": ...}` bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The body was not a well-formed commit record.
    #[error(transparent)]
    Rejected(#[from] JsonRejection),

    /// The body parsed but violates an invariant.
    #[error("{0}")]
    Validation(String),

    /// Failure outside the analyzer's fallback boundary.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Rejected(rejection) => rejection.status(),
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Rejected(rejection) => rejection.body_text(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!(%status, %detail, "Request failed");
        } else {
            tracing::warn!(%status, %detail, "Request rejected");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
