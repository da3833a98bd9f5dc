//! Language model provider layer for stockscope
//!
//! This crate provides provider-agnostic abstractions for talking to Large
//! Language Models. It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - The [`LLMProvider`] trait and concrete Gemini, OpenAI and Anthropic providers
//! - The [`TextGenerator`] capability (`prompt in, text out`) used by the
//!   news and question-answering pipeline

pub mod completion;
pub mod error;
pub mod generator;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use generator::{ProviderGenerator, TextGenerator};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LLMProvider;

#[cfg(any(test, feature = "mock"))]
pub use generator::MockTextGenerator;
