//! Error types for the price and news pipeline

use thiserror::Error;

/// Pipeline errors
///
/// Only [`InsightError::DataUnavailable`] and [`InsightError::InvalidInput`]
/// ever reach an HTTP client. Model failures are absorbed by the component
/// that called the model, and configuration failures stop the process at
/// startup.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Market data could not be retrieved or understood
    #[error("Market data unavailable: {0}")]
    DataUnavailable(String),

    /// The language model failed, is not configured, or returned nothing
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Request validation failed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing secret or malformed setting
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, InsightError>;

impl From<reqwest::Error> for InsightError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InsightError::DataUnavailable(format!("request timed out: {err}"))
        } else {
            InsightError::DataUnavailable(format!("request failed: {err}"))
        }
    }
}

impl From<serde_json::Error> for InsightError {
    fn from(err: serde_json::Error) -> Self {
        InsightError::DataUnavailable(format!("invalid JSON: {err}"))
    }
}

impl From<stockscope_llm::LLMError> for InsightError {
    fn from(err: stockscope_llm::LLMError) -> Self {
        InsightError::ModelUnavailable(err.to_string())
    }
}

impl From<stockscope_prompt::PromptError> for InsightError {
    fn from(err: stockscope_prompt::PromptError) -> Self {
        InsightError::ModelUnavailable(err.to_string())
    }
}

impl From<stockscope_utils::EnvError> for InsightError {
    fn from(err: stockscope_utils::EnvError) -> Self {
        InsightError::Config(err.to_string())
    }
}
