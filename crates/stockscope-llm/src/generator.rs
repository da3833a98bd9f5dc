//! Prompt-in, text-out capability
//!
//! The pipeline only ever needs "send this prompt, give me the text back".
//! [`TextGenerator`] is that seam; [`ProviderGenerator`] adapts any
//! [`LLMProvider`] to it.

use crate::{CompletionRequest, LLMError, LLMProvider, Message, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

const MAX_REPLY_TOKENS: usize = 512;

/// Generates text for a single prompt
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one prompt and return the model's text (possibly empty)
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// [`TextGenerator`] backed by an [`LLMProvider`]
///
/// Each call runs on its own tokio task so a slow provider never occupies the
/// task that is serving the HTTP request.
#[derive(Clone)]
pub struct ProviderGenerator {
    provider: Arc<dyn LLMProvider>,
    model: String,
}

impl ProviderGenerator {
    /// Create a generator for the given provider and model
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    fn request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest::builder(&self.model)
            .add_message(Message::user(prompt))
            .max_tokens(MAX_REPLY_TOKENS)
            .build()
    }
}

impl std::fmt::Debug for ProviderGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderGenerator")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TextGenerator for ProviderGenerator {
    #[instrument(
        skip(self, prompt),
        fields(provider = %self.provider.name(), model = %self.model, prompt_len = prompt.len())
    )]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = self.request(prompt);
        let provider = Arc::clone(&self.provider);

        let response = tokio::spawn(async move { provider.complete(request).await })
            .await
            .map_err(|e| LLMError::TaskFailed(e.to_string()))??;

        debug!(
            stop_reason = ?response.stop_reason,
            tokens = response.usage.total(),
            "generation finished"
        );

        response.message.text().ok_or(LLMError::EmptyResponse)
    }
}
