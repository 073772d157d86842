//! AI client trait and shared helpers.

pub mod augmenter;
pub mod error;
pub mod openai;
pub mod prompts;
#[cfg(test)]
pub(crate) mod test_utils;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;

pub use augmenter::{AiAugmenter, Augmenter, DisabledAugmenter};
pub use error::AiError;
pub use openai::OpenAiAiClient;

/// Transport-level timeout for AI API calls.
///
/// The augmenter applies its own, usually shorter, per-analysis deadline on
/// top of this.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Identifies the backend behind an [`AiClient`].
#[derive(Clone, Debug)]
pub struct AiClientMetadata {
    /// Provider label, e.g. `OpenAI` or `Ollama`.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens requested per response.
    pub max_response_length: usize,
}

/// Builds an HTTP client with the standard request timeout.
pub(crate) fn build_http_client() -> Result<Client, AiError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| AiError::NetworkError(format!("Failed to build HTTP client: {e}")))
}

/// Checks an HTTP response for error status.
///
/// On success, returns the response unchanged for further processing.
/// On failure, reads the error body into an [`AiError::ApiRequestFailed`].
pub(crate) async fn check_error_response(
    response: reqwest::Response,
) -> Result<reqwest::Response, AiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response.text().await.unwrap_or_else(|e| {
        tracing::debug!("Failed to read error response body: {e}");
        String::new()
    });
    Err(AiError::ApiRequestFailed(format!("HTTP {status}: {error_text}")))
}

/// A chat-style text generation backend.
pub trait AiClient: Send + Sync {
    /// Sends one system/user prompt pair and returns the generated text.
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiError>> + Send + 'a>>;

    /// Provider and model, as reported by `/capabilities`.
    fn get_metadata(&self) -> AiClientMetadata;
}
