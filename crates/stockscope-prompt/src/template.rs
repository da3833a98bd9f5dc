//! Core prompt template trait

use crate::Result;

/// Core trait for prompt templates
///
/// This trait is dyn-compatible, using `serde_json::Value` for variables
/// instead of generics, so templates can live together in a registry.
pub trait PromptTemplate: Send + Sync {
    /// Get the template name/identifier
    fn name(&self) -> &str;

    /// Render the template with variables
    fn render(&self, vars: &serde_json::Value) -> Result<String>;
}
