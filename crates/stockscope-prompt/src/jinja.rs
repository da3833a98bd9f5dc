//! MiniJinja-based template implementation
//!
//! This module provides a [`JinjaTemplate`] implementation that uses the MiniJinja
//! template engine for variable interpolation and loops.

use crate::{PromptError, PromptTemplate, Result};
use minijinja::Environment;

/// A prompt template backed by MiniJinja
///
/// # Template Syntax
///
/// The template uses standard Jinja2 syntax:
/// - Variables: `{{ variable }}`
/// - Filters: `{{ name | upper }}`, `{{ close | price }}`
/// - Conditionals: `{% if condition %}...{% endif %}`
/// - Loops: `{% for item in items %}...{% endfor %}`
///
/// Block tags swallow the newline that follows them, so a loop body written
/// on its own line renders as one line per item.
pub struct JinjaTemplate {
    name: String,
    source: String,
}

impl JinjaTemplate {
    /// Create a template, validating that it parses
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = source.into();

        {
            let env = environment();
            env.template_from_str(&source)
                .map(|_| ())
                .map_err(|e| PromptError::TemplateParseFailed {
                    name: name.clone(),
                    detail: e.to_string(),
                })?;
        }

        Ok(Self { name, source })
    }
}

fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("price", |v: f64| format!("{v:.2}"));
    env
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, vars: &serde_json::Value) -> Result<String> {
        // A fresh environment per render keeps the template free of lifetimes
        let env = environment();
        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(&self.source, value)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("len", &self.source.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_template() {
        let template = JinjaTemplate::new("test", "Hello, {{ name }}!").unwrap();

        let result = template.render(&json!({ "name": "World" })).unwrap();
        assert_eq!(result, "Hello, World!");
        assert_eq!(template.name(), "test");
    }

    #[test]
    fn test_filters() {
        let template = JinjaTemplate::new("test", "{{ ticker | upper }}").unwrap();

        let result = template.render(&json!({ "ticker": "aapl" })).unwrap();
        assert_eq!(result, "AAPL");
    }

    #[test]
    fn test_price_filter() {
        let template = JinjaTemplate::new("test", "${{ close | price }}").unwrap();

        assert_eq!(template.render(&json!({ "close": 187.5 })).unwrap(), "$187.50");
        assert_eq!(template.render(&json!({ "close": 3.14159 })).unwrap(), "$3.14");
    }

    #[test]
    fn test_invalid_template_error() {
        let result = JinjaTemplate::new("test", "{{ unclosed");
        assert!(matches!(result, Err(PromptError::TemplateParseFailed { .. })));
    }

    #[test]
    fn test_loop_one_line_per_item() {
        let template = JinjaTemplate::new(
            "loop",
            "Items:\n{% for item in items %}\n- {{ item }}\n{% endfor %}\nDone.",
        )
        .unwrap();

        let result = template
            .render(&json!({ "items": ["one", "two"] }))
            .unwrap();

        assert_eq!(result, "Items:\n- one\n- two\nDone.");
    }

    #[test]
    fn test_conditional() {
        let template = JinjaTemplate::new(
            "conditional",
            "{% if summary %}{{ summary }}{% else %}No summary provided.{% endif %}",
        )
        .unwrap();

        assert_eq!(template.render(&json!({ "summary": "Beat" })).unwrap(), "Beat");
        assert_eq!(
            template.render(&json!({ "summary": "" })).unwrap(),
            "No summary provided."
        );
    }

    #[test]
    fn test_debug() {
        let template = JinjaTemplate::new("test", "Hello").unwrap();
        let debug = format!("{template:?}");
        assert!(debug.contains("JinjaTemplate"));
        assert!(debug.contains("test"));
    }
}
