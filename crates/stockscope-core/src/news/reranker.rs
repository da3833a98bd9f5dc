//! Language model reranker

use super::curator::Reranker;
use crate::error::{InsightError, Result};
use crate::models::NewsArticle;
use crate::prompts::RERANK_NEWS;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use stockscope_llm::TextGenerator;
use stockscope_prompt::PromptRegistry;
use tracing::{debug, instrument};

/// Asks the language model to order candidates by index
///
/// The reply must contain a JSON array of candidate indices; the first such
/// array found is used.
pub struct LlmReranker {
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<PromptRegistry>,
}

impl LlmReranker {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: Arc<PromptRegistry>) -> Self {
        Self { generator, prompts }
    }
}

#[async_trait]
impl Reranker for LlmReranker {
    #[instrument(skip(self, articles), fields(candidates = articles.len()))]
    async fn rerank(
        &self,
        ticker: &str,
        articles: &[NewsArticle],
        limit: usize,
    ) -> Result<Vec<NewsArticle>> {
        let candidates: Vec<_> = articles
            .iter()
            .enumerate()
            .map(|(index, article)| {
                json!({
                    "index": index,
                    "title": article.title,
                    "summary": article.summary_text().unwrap_or_default(),
                })
            })
            .collect();

        let prompt = self.prompts.render(
            RERANK_NEWS,
            &json!({
                "ticker": ticker.to_uppercase(),
                "limit": limit,
                "candidates": candidates,
            }),
        )?;

        let reply = self.generator.generate(&prompt).await?;
        let indices = parse_indices(&reply)?;
        debug!(?indices, "model ranking");

        let mut seen = vec![false; articles.len()];
        indices
            .into_iter()
            .map(|index| {
                let article = articles.get(index).ok_or_else(|| {
                    InsightError::ModelUnavailable(format!("index {index} is out of range"))
                })?;
                if std::mem::replace(&mut seen[index], true) {
                    return Err(InsightError::ModelUnavailable(format!(
                        "index {index} was selected twice"
                    )));
                }
                Ok(article.clone())
            })
            .collect()
    }
}

/// Extract the first JSON array of non-negative integers from a reply
fn parse_indices(reply: &str) -> Result<Vec<usize>> {
    let pattern = regex::Regex::new(r"\[\s*(?:\d+\s*(?:,\s*\d+\s*)*)?\]")
        .map_err(|e| InsightError::ModelUnavailable(e.to_string()))?;

    let found = pattern.find(reply).ok_or_else(|| {
        InsightError::ModelUnavailable("reply contains no index array".to_string())
    })?;

    serde_json::from_str(found.as_str())
        .map_err(|e| InsightError::ModelUnavailable(format!("unreadable index array: {e}")))
}
