//! Question answering over prices and news

use crate::error::Result;
use crate::model::generate_text;
use crate::models::{AskAnswer, NewsArticle, PricePoint, PriceRange};
use crate::prompts::ANSWER_QUESTION;
use serde_json::json;
use std::sync::Arc;
use stockscope_llm::TextGenerator;
use stockscope_prompt::PromptRegistry;
use tracing::{instrument, warn};

const MAX_SOURCES: usize = 3;
const MAX_PROMPT_HEADLINES: usize = 5;

/// Result of answering one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// An answer is available
    Answered(AskAnswer),

    /// The model could not answer; `sources` are still valid
    Unavailable { sources: Vec<String>, reason: String },
}

/// First three non-empty article URLs, in curated order
pub fn compute_sources(articles: &[NewsArticle]) -> Vec<String> {
    articles
        .iter()
        .map(|a| a.url.trim())
        .filter(|url| !url.is_empty())
        .take(MAX_SOURCES)
        .map(str::to_string)
        .collect()
}

/// Answers free-text questions from the latest close and curated headlines
#[derive(Clone)]
pub struct QuestionAnswerer {
    generator: Option<Arc<dyn TextGenerator>>,
    prompts: Arc<PromptRegistry>,
}

impl QuestionAnswerer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, prompts: Arc<PromptRegistry>) -> Self {
        Self { generator, prompts }
    }

    /// Answer `question` about `ticker`
    ///
    /// Without prices the answer is a fixed notice and the model is not
    /// called.
    #[instrument(
        skip(self, question, prices, curated),
        fields(prices = prices.len(), articles = curated.len())
    )]
    pub async fn answer(
        &self,
        question: &str,
        ticker: &str,
        range: PriceRange,
        prices: &[PricePoint],
        curated: &[NewsArticle],
    ) -> AnswerOutcome {
        let ticker = ticker.to_uppercase();
        let sources = compute_sources(curated);

        let Some(latest) = prices.iter().max_by_key(|p| p.date) else {
            return AnswerOutcome::Answered(AskAnswer {
                text: format!(
                    "I couldn't retrieve recent price data for {ticker}, so I can't answer confidently right now."
                ),
                sources,
            });
        };

        match self.generate(question, &ticker, range, latest, curated).await {
            Ok(text) => AnswerOutcome::Answered(AskAnswer { text, sources }),
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "answer unavailable");
                AnswerOutcome::Unavailable {
                    sources,
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn generate(
        &self,
        question: &str,
        ticker: &str,
        range: PriceRange,
        latest: &PricePoint,
        curated: &[NewsArticle],
    ) -> Result<String> {
        let headlines: Vec<_> = curated
            .iter()
            .take(MAX_PROMPT_HEADLINES)
            .map(|a| json!({ "title": a.title, "url": a.url.trim() }))
            .collect();

        let prompt = self.prompts.render(
            ANSWER_QUESTION,
            &json!({
                "ticker": ticker,
                "question": question,
                "range": range.as_str(),
                "close": latest.close,
                "date": latest.date.format("%Y-%m-%d").to_string(),
                "headlines": headlines,
            }),
        )?;

        generate_text(self.generator.as_ref(), &prompt).await
    }
}
