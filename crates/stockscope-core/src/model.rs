//! Language model wiring
//!
//! Builds the shared [`TextGenerator`] from configuration and provides the
//! single call path every model-backed component goes through.

use crate::config::{InsightConfig, ModelProvider};
use crate::error::{InsightError, Result};
use std::sync::Arc;
use stockscope_llm::providers::{AnthropicProvider, GeminiProvider, OpenAIConfig, OpenAIProvider};
use stockscope_llm::{LLMProvider, ProviderGenerator, TextGenerator};
use tracing::{info, warn};

/// Build the configured text generator
///
/// Returns `Ok(None)` when no model key is configured; every model-backed
/// component then runs its fallback.
pub fn build_generator(config: &InsightConfig) -> Result<Option<Arc<dyn TextGenerator>>> {
    let Some(api_key) = config.model_api_key.clone() else {
        warn!(
            provider = %config.model_provider,
            key = config.model_provider.key_var(),
            "no language model key configured, summaries and answers will use fallback text"
        );
        return Ok(None);
    };

    let provider: Arc<dyn LLMProvider> = match config.model_provider {
        ModelProvider::Gemini => Arc::new(GeminiProvider::new(api_key)?),
        ModelProvider::OpenAI => {
            let mut openai = OpenAIConfig::new(api_key);
            if let Some(base) = &config.openai_api_base {
                openai = openai.with_api_base(base.clone());
            }
            Arc::new(OpenAIProvider::with_config(openai)?)
        }
        ModelProvider::Anthropic => Arc::new(AnthropicProvider::new(api_key)?),
    };

    info!(
        provider = %config.model_provider,
        model = %config.model_name,
        "language model configured"
    );

    Ok(Some(Arc::new(ProviderGenerator::new(
        provider,
        config.model_name.clone(),
    ))))
}

/// Run `prompt` and return the trimmed reply
///
/// A missing generator, a failed call and a blank reply are all
/// [`InsightError::ModelUnavailable`].
pub(crate) async fn generate_text(
    generator: Option<&Arc<dyn TextGenerator>>,
    prompt: &str,
) -> Result<String> {
    let generator = generator.ok_or_else(|| {
        InsightError::ModelUnavailable("no language model configured".to_string())
    })?;

    let reply = generator.generate(prompt).await?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(InsightError::ModelUnavailable(
            "model returned blank text".to_string(),
        ));
    }

    Ok(reply.to_string())
}
