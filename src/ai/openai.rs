//! OpenAI-compatible chat-completions client (works with OpenAI, Ollama, etc.)

use std::future::Future;
use std::pin::Pin;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{build_http_client, check_error_response, AiClient, AiClientMetadata, AiError};

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default model used for commit commentary.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Response token budget for commit commentary.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Sampling temperature for commit commentary.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

const OLLAMA_PORT: &str = ":11434";

/// Chat message in the request body.
#[derive(Serialize, Debug)]
struct Message {
    role: &'static str,
    content: String,
}

/// Chat-completions request body.
#[derive(Serialize, Debug)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

/// Response choice.
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

/// Response message. Some servers send `null` content on refusals.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

/// Chat-completions response.
#[derive(Deserialize, Debug)]
struct OpenAiResponse {
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<Usage>,
}

/// Token usage statistics.
#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct Usage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

/// OpenAI-compatible API client.
pub struct OpenAiAiClient {
    /// HTTP client for API requests.
    client: Client,
    /// API key for bearer authentication (optional for Ollama).
    api_key: Option<String>,
    /// Model identifier.
    model: String,
    /// Base URL, e.g. "https://api.openai.com" or "http://localhost:11434".
    base_url: String,
    /// Maximum tokens for responses.
    max_tokens: u32,
    /// Sampling temperature.
    temperature: f32,
}

impl OpenAiAiClient {
    /// Creates a new OpenAI-compatible API client.
    pub fn new(
        model: String,
        api_key: Option<String>,
        base_url: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Self, AiError> {
        Ok(Self {
            client: build_http_client()?,
            api_key,
            model,
            base_url,
            max_tokens,
            temperature,
        })
    }

    /// Builds the full chat-completions URL.
    fn api_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let url = format!("{base}/v1/chat/completions");
        debug!(
            base_url = %self.base_url,
            full_url = %url,
            "Constructed OpenAI-compatible API URL"
        );
        url
    }

    /// Determines if this is likely an Ollama instance: keyless, or on
    /// Ollama's default port.
    fn is_ollama(&self) -> bool {
        self.api_key.is_none() || self.base_url.trim_end_matches('/').ends_with(OLLAMA_PORT)
    }
}

impl AiClient for OpenAiAiClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiError>> + Send + 'a>> {
        Box::pin(async move {
            debug!(
                system_prompt_len = system_prompt.len(),
                user_prompt_len = user_prompt.len(),
                model = %self.model,
                "Preparing OpenAI-compatible API request"
            );

            let mut messages = Vec::with_capacity(2);
            if !system_prompt.is_empty() {
                messages.push(Message {
                    role: "system",
                    content: system_prompt.to_string(),
                });
            }
            messages.push(Message {
                role: "user",
                content: user_prompt.to_string(),
            });

            let request = OpenAiRequest {
                model: self.model.clone(),
                messages,
                max_tokens: self.max_tokens,
                temperature: self.temperature,
                stream: false,
            };

            let api_url = self.api_url();
            info!(url = %api_url, model = %self.model, "Sending request to OpenAI-compatible API");

            let mut req_builder = self.client.post(&api_url).json(&request);
            if let Some(ref api_key) = self.api_key {
                req_builder = req_builder.bearer_auth(api_key);
            }

            let response = req_builder
                .send()
                .await
                .map_err(|e| AiError::NetworkError(e.to_string()))?;
            let response = check_error_response(response).await?;

            let openai_response: OpenAiResponse = response
                .json()
                .await
                .map_err(|e| AiError::InvalidResponseFormat(e.to_string()))?;

            debug!(
                choice_count = openai_response.choices.len(),
                model = ?openai_response.model,
                usage = ?openai_response.usage,
                "Received OpenAI-compatible API response"
            );

            let text = openai_response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| AiError::InvalidResponseFormat("No choices in response".to_string()))?
                .message
                .content
                .unwrap_or_default();

            if text.trim().is_empty() {
                return Err(AiError::EmptyResponse);
            }

            debug!(response_len = text.len(), "Extracted text from OpenAI-compatible API response");
            Ok(text)
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        let provider = if self.is_ollama() { "Ollama" } else { "OpenAI" };
        AiClientMetadata {
            provider: provider.to_string(),
            model: self.model.clone(),
            max_response_length: self.max_tokens as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, api_key: Option<&str>) -> OpenAiAiClient {
        OpenAiAiClient::new(
            "gpt-test".to_string(),
            api_key.map(String::from),
            server.uri(),
            DEFAULT_MAX_TOKENS,
            DEFAULT_TEMPERATURE,
        )
        .unwrap()
    }

    #[test]
    fn metadata_reports_provider_and_budget() {
        let client = OpenAiAiClient::new(
            "gpt-4".to_string(),
            Some("sk-test".to_string()),
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MAX_TOKENS,
            DEFAULT_TEMPERATURE,
        )
        .unwrap();
        let metadata = client.get_metadata();
        assert_eq!(metadata.provider, "OpenAI");
        assert_eq!(metadata.model, "gpt-4");
        assert_eq!(metadata.max_response_length, 500);
    }

    #[test]
    fn keyed_local_proxy_is_not_ollama() {
        let client = OpenAiAiClient::new(
            "gpt-4".to_string(),
            Some("sk-test".to_string()),
            "http://127.0.0.1:8080".to_string(),
            100,
            0.0,
        )
        .unwrap();
        assert_eq!(client.get_metadata().provider, "OpenAI");

        let keyed_ollama = OpenAiAiClient::new(
            "llama3".to_string(),
            Some("sk-test".to_string()),
            "http://gpu-box:11434".to_string(),
            100,
            0.0,
        )
        .unwrap();
        assert_eq!(keyed_ollama.get_metadata().provider, "Ollama");
    }

    #[test]
    fn api_url_trims_trailing_slash() {
        let client = OpenAiAiClient::new(
            "llama3".to_string(),
            None,
            "http://localhost:11434/".to_string(),
            100,
            0.0,
        )
        .unwrap();
        assert_eq!(client.api_url(), "http://localhost:11434/v1/chat/completions");
        assert_eq!(client.get_metadata().provider, "Ollama");
    }

    #[tokio::test]
    async fn sends_prompts_and_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-test",
                "max_tokens": 500,
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "usr" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "gpt-test",
                "choices": [
                    { "message": { "role": "assistant", "content": "Looks fine." }, "finish_reason": "stop" }
                ],
                "usage": { "prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-test"));
        let text = client.send_request("sys", "usr").await.unwrap();
        assert_eq!(text, "Looks fine.");
    }

    #[tokio::test]
    async fn http_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("sk-wrong"));
        let err = client.send_request("sys", "usr").await.unwrap_err();
        match err {
            AiError::ApiRequestFailed(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("bad key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_choices_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.send_request("sys", "usr").await.unwrap_err();
        assert!(matches!(err, AiError::InvalidResponseFormat(_)));
    }

    #[tokio::test]
    async fn blank_content_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [ { "message": { "role": "assistant", "content": null } } ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.send_request("sys", "usr").await.unwrap_err();
        assert!(matches!(err, AiError::EmptyResponse));
    }

    #[tokio::test]
    async fn malformed_body_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.send_request("sys", "usr").await.unwrap_err();
        assert!(matches!(err, AiError::InvalidResponseFormat(_)));
    }
}
