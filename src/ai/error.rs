//! Text-generation client errors.

use thiserror::Error;

/// Failures talking to the text-generation service.
#[derive(Error, Debug)]
pub enum AiError {
    /// The service answered with a non-success status.
    #[error("AI API request failed: {0}")]
    ApiRequestFailed(String),

    /// The response body could not be interpreted.
    #[error("Invalid response format from AI API: {0}")]
    InvalidResponseFormat(String),

    /// The service returned no usable text.
    #[error("AI API returned an empty response")]
    EmptyResponse,

    /// The request did not finish within the configured timeout.
    #[error("AI request timed out after {0} seconds")]
    Timeout(u64),

    /// Transport-level failure.
    #[error("Network error: {0}")]
    NetworkError(String),
}
