//! Optional AI commentary for analyses.
//!
//! Whether commentary is available is decided once, when the analyzer is
//! built: it receives either an [`AiAugmenter`] or a [`DisabledAugmenter`].

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::debug;

use super::prompts::{generate_user_prompt, SYSTEM_PROMPT};
use super::{AiClient, AiClientMetadata, AiError};
use crate::data::CommitRecord;

/// Default deadline for one commentary request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of free-text commentary on a commit.
pub trait Augmenter: Send + Sync {
    /// Requests commentary for `record`.
    ///
    /// `Ok(None)` means commentary is not available by configuration.
    fn augment<'a>(
        &'a self,
        record: &'a CommitRecord,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AiError>> + Send + 'a>>;

    /// Metadata of the backing client, `None` when disabled.
    fn metadata(&self) -> Option<AiClientMetadata>;

    /// Whether commentary requests are made at all.
    fn is_enabled(&self) -> bool {
        self.metadata().is_some()
    }
}

/// Commentary from an [`AiClient`], bounded by a deadline.
pub struct AiAugmenter {
    client: Box<dyn AiClient>,
    timeout: Duration,
}

impl AiAugmenter {
    /// Wraps `client`; each request is abandoned after `timeout`.
    pub fn new(client: Box<dyn AiClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

impl Augmenter for AiAugmenter {
    fn augment<'a>(
        &'a self,
        record: &'a CommitRecord,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AiError>> + Send + 'a>> {
        Box::pin(async move {
            let prompt = generate_user_prompt(record);
            debug!(
                commit = %record.commit_hash,
                prompt_len = prompt.len(),
                "Requesting AI commentary"
            );
            let text = tokio::time::timeout(
                self.timeout,
                self.client.send_request(SYSTEM_PROMPT, &prompt),
            )
            .await
            .map_err(|_| AiError::Timeout(self.timeout.as_secs()))??;
            Ok(Some(text))
        })
    }

    fn metadata(&self) -> Option<AiClientMetadata> {
        Some(self.client.get_metadata())
    }
}

/// Augmenter used when no AI service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAugmenter;

impl Augmenter for DisabledAugmenter {
    fn augment<'a>(
        &'a self,
        _record: &'a CommitRecord,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AiError>> + Send + 'a>> {
        Box::pin(async { Ok(None) })
    }

    fn metadata(&self) -> Option<AiClientMetadata> {
        None
    }
}
