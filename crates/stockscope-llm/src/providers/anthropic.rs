//! Anthropic Claude provider implementation
//!
//! This module implements the LLMProvider trait for Anthropic's Claude models.
//! See: https://docs.anthropic.com/en/api/messages

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, Result, Role, StopReason, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model used when none is configured
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-latest";

/// Anthropic Claude provider
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to Anthropic API");

        // Anthropic takes the system prompt as a top-level field
        let anthropic_request = AnthropicRequest {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .filter(|m| m.role != Role::System)
                .collect(),
            system: request.system,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{ANTHROPIC_API_BASE}/messages"))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&anthropic_request)
            .send()
            .await?;

        // Handle errors
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(anthropic_request.model),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let anthropic_response: AnthropicResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        Ok(convert_response(anthropic_response))
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

fn convert_response(response: AnthropicResponse) -> CompletionResponse {
    debug!(
        "Received response - stop_reason: {}, tokens: {}/{}",
        response.stop_reason, response.usage.input_tokens, response.usage.output_tokens
    );

    CompletionResponse {
        message: Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(response.content)),
        },
        stop_reason: match response.stop_reason.as_str() {
            "end_turn" => StopReason::EndTurn,
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            "refusal" => StopReason::Filtered,
            other => {
                debug!("Unknown stop reason: {}", other);
                StopReason::EndTurn
            }
        },
        usage: TokenUsage {
            input_tokens: response.usage.input_tokens,
            output_tokens: response.usage.output_tokens,
        },
    }
}

// Anthropic-specific request/response types
// These match the Anthropic API format exactly

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    stop_reason: String,
    usage: UsageResponse,
}

#[derive(Debug, Deserialize)]
struct UsageResponse {
    input_tokens: usize,
    output_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = AnthropicProvider::new("test-key");
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().name(), "anthropic");
    }

    #[test]
    fn test_convert_response() {
        let raw = r#"{
            "content": [{"type": "text", "text": "Microsoft beat estimates."}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 20, "output_tokens": 5}
        }"#;
        let response: AnthropicResponse = serde_json::from_str(raw).unwrap();
        let converted = convert_response(response);

        assert_eq!(
            converted.message.text().as_deref(),
            Some("Microsoft beat estimates.")
        );
        assert_eq!(converted.stop_reason, StopReason::EndTurn);
        assert_eq!(converted.usage.total(), 25);
    }

    #[test]
    fn test_convert_max_tokens() {
        let raw = r#"{
            "content": [{"type": "text", "text": "Partial"}],
            "stop_reason": "max_tokens",
            "usage": {"input_tokens": 1, "output_tokens": 1}
        }"#;
        let response: AnthropicResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(convert_response(response).stop_reason, StopReason::MaxTokens);
    }
}
