//! Scripted AI client for analyzer and augmenter tests.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ai::{AiClient, AiClientMetadata, AiError};

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<String, AiError>>,
    calls: Vec<SentPrompt>,
}

/// One request as the client saw it.
#[derive(Debug, Clone)]
pub(crate) struct SentPrompt {
    pub(crate) system: String,
    pub(crate) user: String,
}

/// Client that plays back queued replies and logs every request.
///
/// Once the queue runs dry every call fails with
/// [`AiError::ApiRequestFailed`].
pub(crate) struct ScriptedAiClient {
    script: Arc<Mutex<Script>>,
    latency: Option<Duration>,
}

impl ScriptedAiClient {
    pub(crate) fn new(replies: Vec<Result<String, AiError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                replies: replies.into(),
                calls: Vec::new(),
            })),
            latency: None,
        }
    }

    /// Delays every reply; pairs with a paused tokio clock.
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Handle that stays readable after the client is boxed away.
    pub(crate) fn call_log(&self) -> CallLog {
        CallLog(Arc::clone(&self.script))
    }
}

/// Read side of a [`ScriptedAiClient`].
pub(crate) struct CallLog(Arc<Mutex<Script>>);

impl CallLog {
    pub(crate) fn calls(&self) -> Vec<SentPrompt> {
        self.0.lock().unwrap().calls.clone()
    }

    pub(crate) fn count(&self) -> usize {
        self.0.lock().unwrap().calls.len()
    }
}

impl AiClient for ScriptedAiClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiError>> + Send + 'a>> {
        Box::pin(async move {
            let reply = {
                let mut script = self.script.lock().unwrap();
                script.calls.push(SentPrompt {
                    system: system_prompt.to_string(),
                    user: user_prompt.to_string(),
                });
                script.replies.pop_front()
            };
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            reply.unwrap_or_else(|| Err(AiError::ApiRequestFailed("script exhausted".to_string())))
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "Scripted".to_string(),
            model: "scripted-model".to_string(),
            max_response_length: 500,
        }
    }
}
