//! Error types for prompt operations

use thiserror::Error;

/// Result type for prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors that can occur during prompt operations
#[derive(Error, Debug)]
pub enum PromptError {
    /// Template parsing failed
    #[error("Failed to parse template '{name}': {detail}")]
    TemplateParseFailed { name: String, detail: String },

    /// Template rendering failed
    #[error("Failed to render template '{name}': {detail}")]
    RenderError { name: String, detail: String },

    /// Template not registered in registry
    #[error("Template '{0}' not registered")]
    TemplateNotRegistered(String),
}
