//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait for
//! the services stockscope can talk to.

pub mod anthropic;
pub mod gemini;
pub mod openai;

pub use anthropic::{AnthropicProvider, DEFAULT_ANTHROPIC_MODEL};
pub use gemini::{DEFAULT_GEMINI_MODEL, GeminiConfig, GeminiProvider};
pub use openai::{DEFAULT_OPENAI_MODEL, OpenAIConfig, OpenAIProvider};
