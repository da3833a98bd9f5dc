//! Prompt templates used by the summarizer, reranker and answerer
//!
//! All templates live in one [`PromptRegistry`] that is built at startup and
//! shared read-only between requests.

mod templates;

pub use templates::*;

use stockscope_prompt::{PromptRegistry, Result};

/// Register every pipeline prompt with the given registry
///
/// # Example
///
/// ```
/// use stockscope_prompt::PromptRegistry;
/// use stockscope_core::prompts::{register_prompts, SUMMARIZE_NEWS};
///
/// let registry = PromptRegistry::new();
/// register_prompts(&registry).expect("built-in prompts parse");
/// assert!(registry.names().iter().any(|n| n == SUMMARIZE_NEWS));
/// ```
pub fn register_prompts(registry: &PromptRegistry) -> Result<()> {
    registry.register(summarize_news_prompt()?);
    registry.register(rerank_news_prompt()?);
    registry.register(answer_question_prompt()?);

    Ok(())
}

/// Build a registry holding every pipeline prompt
pub fn default_registry() -> Result<PromptRegistry> {
    let registry = PromptRegistry::new();
    register_prompts(&registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_all_prompts() {
        let registry = PromptRegistry::new();
        assert!(register_prompts(&registry).is_ok());

        assert_eq!(
            registry.names(),
            vec![ANSWER_QUESTION, RERANK_NEWS, SUMMARIZE_NEWS]
        );
    }

    #[test]
    fn test_render_summary_prompt() {
        let registry = default_registry().unwrap();
        let prompt = registry
            .render(
                SUMMARIZE_NEWS,
                &json!({
                    "ticker": "AAPL",
                    "articles": [
                        { "title": "AAPL beats", "summary": "Revenue up" },
                        { "title": "iPhone demand", "summary": "No summary provided." }
                    ]
                }),
            )
            .unwrap();

        assert!(prompt.contains("for AAPL in 2-3 sentences"));
        assert!(prompt.contains(
            "\n- AAPL beats: Revenue up\n- iPhone demand: No summary provided.\n"
        ));
    }

    #[test]
    fn test_render_rerank_prompt() {
        let registry = default_registry().unwrap();
        let prompt = registry
            .render(
                RERANK_NEWS,
                &json!({
                    "ticker": "TSLA",
                    "limit": 2,
                    "candidates": [
                        { "index": 0, "title": "Oil climbs", "summary": "" },
                        { "index": 1, "title": "TSLA deliveries", "summary": "Record quarter" }
                    ]
                }),
            )
            .unwrap();

        assert!(prompt.contains("at most 2 entries"));
        assert!(prompt.contains("[0] Oil climbs: \n[1] TSLA deliveries: Record quarter\n"));
    }

    #[test]
    fn test_render_answer_prompt() {
        let registry = default_registry().unwrap();
        let prompt = registry
            .render(
                ANSWER_QUESTION,
                &json!({
                    "ticker": "NVDA",
                    "question": "Why did it move?",
                    "range": "1W",
                    "close": 875.1,
                    "date": "2024-03-08",
                    "headlines": [
                        { "title": "NVDA record", "url": "https://example.com/1" },
                        { "title": "Chip rally", "url": "" }
                    ]
                }),
            )
            .unwrap();

        assert!(prompt.contains("Question: Why did it move?"));
        assert!(prompt.contains("Range: 1W"));
        assert!(prompt.contains("Latest close: $875.10 on 2024-03-08"));
        assert!(prompt.contains("- NVDA record (https://example.com/1)\n- Chip rally\n"));
        assert!(!prompt.contains("No recent headlines"));
    }

    #[test]
    fn test_render_answer_prompt_without_headlines() {
        let registry = default_registry().unwrap();
        let prompt = registry
            .render(
                ANSWER_QUESTION,
                &json!({
                    "ticker": "NVDA",
                    "question": "Why did it move?",
                    "range": "1M",
                    "close": 10.0,
                    "date": "2024-03-08",
                    "headlines": []
                }),
            )
            .unwrap();

        assert!(prompt.contains("- No recent headlines available."));
    }
}
