//! Prompt template management for stockscope
//!
//! Templates use Jinja2 syntax rendered by MiniJinja and are kept in a
//! thread-safe [`PromptRegistry`] keyed by name.
//!
//! # Quick Start
//!
//! ```
//! use stockscope_prompt::{JinjaTemplate, PromptRegistry, PromptTemplate};
//! use serde_json::json;
//!
//! let template = JinjaTemplate::new("greeting", "Latest news for {{ ticker }}").unwrap();
//! assert_eq!(template.render(&json!({ "ticker": "AAPL" })).unwrap(), "Latest news for AAPL");
//!
//! let registry = PromptRegistry::new();
//! registry.register(template);
//! let prompt = registry.render("greeting", &json!({ "ticker": "MSFT" })).unwrap();
//! assert_eq!(prompt, "Latest news for MSFT");
//! ```

mod error;
mod jinja;
mod registry;
mod template;

// Re-export core types
pub use error::{PromptError, Result};
pub use jinja::JinjaTemplate;
pub use registry::PromptRegistry;
pub use template::PromptTemplate;
