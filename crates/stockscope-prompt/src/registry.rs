//! Named prompt lookup

use crate::{PromptError, PromptTemplate, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Prompt templates keyed by name
///
/// Filled once at startup, then shared behind an `Arc` and rendered from
/// request handlers.
pub struct PromptRegistry {
    templates: RwLock<HashMap<String, Arc<dyn PromptTemplate>>>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Add `template` under its own name, replacing any previous entry
    pub fn register<T: PromptTemplate + 'static>(&self, template: T) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(template.name().to_string(), Arc::new(template));
        }
    }

    /// Render the template registered as `name`
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        let template = self
            .templates
            .read()
            .ok()
            .and_then(|t| t.get(name).cloned())
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?;

        template.render(vars)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .templates
            .read()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PromptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRegistry")
            .field("templates", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JinjaTemplate;
    use serde_json::json;

    #[test]
    fn test_render_registered() {
        let registry = PromptRegistry::new();
        registry.register(JinjaTemplate::new("news.summarize", "News for {{ ticker }}").unwrap());

        let prompt = registry.render("news.summarize", &json!({ "ticker": "AAPL" })).unwrap();
        assert_eq!(prompt, "News for AAPL");
    }

    #[test]
    fn test_render_unknown_name() {
        let result = PromptRegistry::new().render("missing", &json!({}));
        assert!(matches!(result, Err(PromptError::TemplateNotRegistered(ref n)) if n == "missing"));
    }

    #[test]
    fn test_register_replaces() {
        let registry = PromptRegistry::new();
        registry.register(JinjaTemplate::new("ask.answer", "v1").unwrap());
        registry.register(JinjaTemplate::new("ask.answer", "v2").unwrap());

        assert_eq!(registry.names(), vec!["ask.answer"]);
        assert_eq!(registry.render("ask.answer", &json!({})).unwrap(), "v2");
    }

    #[test]
    fn test_names_sorted_in_debug() {
        let registry = PromptRegistry::default();
        registry.register(JinjaTemplate::new("news.rerank", "b").unwrap());
        registry.register(JinjaTemplate::new("ask.answer", "a").unwrap());

        assert_eq!(registry.names(), vec!["ask.answer", "news.rerank"]);
        assert!(format!("{registry:?}").contains("ask.answer"));
    }
}
