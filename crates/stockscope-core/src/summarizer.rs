//! News summaries

use crate::error::Result;
use crate::model::generate_text;
use crate::models::NewsArticle;
use crate::prompts::SUMMARIZE_NEWS;
use serde_json::json;
use std::sync::Arc;
use stockscope_llm::TextGenerator;
use stockscope_prompt::PromptRegistry;
use tracing::{instrument, warn};

/// Stands in for an article summary that is missing or blank
pub const NO_SUMMARY_PLACEHOLDER: &str = "No summary provided.";

const MAX_PROMPT_ARTICLES: usize = 5;

/// Writes a short synopsis of curated articles
///
/// Never fails: an empty article list and every model problem produce fixed
/// text instead.
#[derive(Clone)]
pub struct Summarizer {
    generator: Option<Arc<dyn TextGenerator>>,
    prompts: Arc<PromptRegistry>,
}

impl Summarizer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, prompts: Arc<PromptRegistry>) -> Self {
        Self { generator, prompts }
    }

    /// Summarize `articles` for `ticker` in two or three sentences
    #[instrument(skip(self, articles), fields(articles = articles.len()))]
    pub async fn summarize(&self, ticker: &str, articles: &[NewsArticle]) -> String {
        let ticker = ticker.to_uppercase();
        if articles.is_empty() {
            return format!("No high-confidence news found for {ticker}.");
        }

        match self.generate(&ticker, articles).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "summary unavailable, using fallback text");
                format!("Top {ticker} headlines summarized.")
            }
        }
    }

    async fn generate(&self, ticker: &str, articles: &[NewsArticle]) -> Result<String> {
        let items: Vec<_> = articles
            .iter()
            .take(MAX_PROMPT_ARTICLES)
            .map(|article| {
                json!({
                    "title": article.title,
                    "summary": article.summary_text().unwrap_or(NO_SUMMARY_PLACEHOLDER),
                })
            })
            .collect();

        let prompt = self
            .prompts
            .render(SUMMARIZE_NEWS, &json!({ "ticker": ticker, "articles": items }))?;

        generate_text(self.generator.as_ref(), &prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelevanceScore;
    use crate::prompts::default_registry;
    use stockscope_llm::{LLMError, MockTextGenerator};

    fn article(title: &str, summary: Option<&str>) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            url: String::new(),
            source: None,
            published_at: None,
            summary: summary.map(str::to_string),
            relevance_score: RelevanceScore::new(1.0).unwrap(),
            relevance_reason: None,
        }
    }

    fn summarizer(generator: Option<MockTextGenerator>) -> Summarizer {
        Summarizer::new(
            generator.map(|g| Arc::new(g) as Arc<dyn TextGenerator>),
            Arc::new(default_registry().unwrap()),
        )
    }

    #[tokio::test]
    async fn test_empty_input_skips_model() {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().times(0);

        let text = summarizer(Some(generator)).summarize("aapl", &[]).await;
        assert_eq!(text, "No high-confidence news found for AAPL.");
    }

    #[tokio::test]
    async fn test_model_summary_returned_trimmed() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Ok("  Apple rallied on earnings.  ".to_string()));

        let text = summarizer(Some(generator))
            .summarize("AAPL", &[article("AAPL beats", Some("Revenue up"))])
            .await;
        assert_eq!(text, "Apple rallied on earnings.");
    }

    #[tokio::test]
    async fn test_prompt_uses_first_five_and_placeholder() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt| {
                prompt.contains("for TSLA in 2-3 sentences")
                    && prompt.contains("- t0: No summary provided.")
                    && prompt.contains("- t1: No summary provided.")
                    && prompt.contains("- t4: s4")
                    && !prompt.contains("t5")
            })
            .times(1)
            .returning(|_| Ok("ok".to_string()));

        let mut articles = vec![article("t0", None), article("t1", Some("   "))];
        articles.extend((2..7).map(|i| article(&format!("t{i}"), Some(format!("s{i}").as_str()))));

        let text = summarizer(Some(generator)).summarize("tsla", &articles).await;
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_model_failure_falls_back() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(LLMError::RequestFailed("boom".to_string())));

        let text = summarizer(Some(generator))
            .summarize("msft", &[article("x", None)])
            .await;
        assert_eq!(text, "Top MSFT headlines summarized.");
    }

    #[tokio::test]
    async fn test_blank_reply_falls_back() {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().returning(|_| Ok("\n".to_string()));

        let text = summarizer(Some(generator))
            .summarize("MSFT", &[article("x", None)])
            .await;
        assert_eq!(text, "Top MSFT headlines summarized.");
    }

    #[tokio::test]
    async fn test_no_model_falls_back() {
        let text = summarizer(None).summarize("nvda", &[article("x", None)]).await;
        assert_eq!(text, "Top NVDA headlines summarized.");
    }
}
