//! News ranking and trimming

use crate::error::{InsightError, Result};
use crate::models::NewsArticle;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reorders and filters scored articles
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Reranker: Send + Sync {
    /// Return at most `limit` articles from `articles`, most relevant first
    async fn rerank(
        &self,
        ticker: &str,
        articles: &[NewsArticle],
        limit: usize,
    ) -> Result<Vec<NewsArticle>>;
}

/// Ranks articles and trims them to a limit
///
/// With a [`Reranker`] configured, its selection is used whenever it is a
/// valid subset of the input. Otherwise, or on any reranker failure, the
/// articles are stably sorted by relevance score.
#[derive(Clone, Default)]
pub struct NewsCurator {
    reranker: Option<Arc<dyn Reranker>>,
}

impl NewsCurator {
    /// Curator that only uses the score-based ranking
    pub fn new() -> Self {
        Self { reranker: None }
    }

    /// Curator that tries `reranker` first
    pub fn with_reranker(reranker: Arc<dyn Reranker>) -> Self {
        Self {
            reranker: Some(reranker),
        }
    }

    /// Rank `articles` for `ticker` and keep at most `limit`
    pub async fn curate(
        &self,
        ticker: &str,
        articles: Vec<NewsArticle>,
        limit: usize,
    ) -> Vec<NewsArticle> {
        if limit == 0 || articles.is_empty() {
            return Vec::new();
        }

        if let Some(reranker) = &self.reranker {
            let selection = reranker
                .rerank(ticker, &articles, limit)
                .await
                .and_then(|selected| validate_selection(&articles, selected, limit));

            match selection {
                Ok(selected) => {
                    debug!(ticker, selected = selected.len(), "using reranked articles");
                    return selected;
                }
                Err(e) => warn!(ticker, error = %e, "reranker failed, falling back to score order"),
            }
        }

        rank_by_score(articles, limit)
    }
}

impl std::fmt::Debug for NewsCurator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsCurator")
            .field("reranker", &self.reranker.is_some())
            .finish()
    }
}

/// Stable sort by relevance score, highest first, truncated to `limit`
pub fn rank_by_score(mut articles: Vec<NewsArticle>, limit: usize) -> Vec<NewsArticle> {
    articles.sort_by(|a, b| {
        b.relevance_score
            .value()
            .total_cmp(&a.relevance_score.value())
    });
    articles.truncate(limit);
    articles
}

/// Accept a reranker's output only if every article is a distinct input article
fn validate_selection(
    input: &[NewsArticle],
    mut selected: Vec<NewsArticle>,
    limit: usize,
) -> Result<Vec<NewsArticle>> {
    if selected.is_empty() {
        return Err(InsightError::ModelUnavailable(
            "reranker selected no articles".to_string(),
        ));
    }

    let mut used = vec![false; input.len()];
    for article in &selected {
        let slot = input
            .iter()
            .enumerate()
            .position(|(i, candidate)| !used[i] && candidate == article)
            .ok_or_else(|| {
                InsightError::ModelUnavailable(format!(
                    "reranker returned an article not in the input: '{}'",
                    article.title
                ))
            })?;
        used[slot] = true;
    }

    selected.truncate(limit);
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelevanceScore;

    fn article(title: &str, score: f64) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            url: format!("https://example.com/{}", title.replace(' ', "-")),
            source: None,
            published_at: None,
            summary: None,
            relevance_score: RelevanceScore::new(score).unwrap(),
            relevance_reason: None,
        }
    }

    fn titles(articles: &[NewsArticle]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    fn feed() -> Vec<NewsArticle> {
        vec![
            article("a", 0.3),
            article("b", 1.0),
            article("c", 0.3),
            article("d", 1.0),
            article("e", 0.3),
        ]
    }

    #[tokio::test]
    async fn test_fallback_stable_sort_and_truncate() {
        let curated = NewsCurator::new().curate("AAPL", feed(), 3).await;
        assert_eq!(titles(&curated), vec!["b", "d", "a"]);
    }

    #[tokio::test]
    async fn test_limit_larger_than_input() {
        let curated = NewsCurator::new().curate("AAPL", feed(), 10).await;
        assert_eq!(titles(&curated), vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_zero_limit_and_empty_input() {
        let curator = NewsCurator::new();
        assert!(tokio_test::block_on(curator.curate("AAPL", feed(), 0)).is_empty());
        assert!(tokio_test::block_on(curator.curate("AAPL", Vec::new(), 3)).is_empty());
    }

    #[tokio::test]
    async fn test_valid_reranker_output_used() {
        let mut reranker = MockReranker::new();
        reranker
            .expect_rerank()
            .withf(|ticker, articles, limit| {
                ticker == "AAPL" && articles.len() == 5 && *limit == 2
            })
            .times(1)
            .returning(|_, articles, _| Ok(vec![articles[4].clone(), articles[0].clone()]));

        let curated = NewsCurator::with_reranker(Arc::new(reranker))
            .curate("AAPL", feed(), 2)
            .await;
        assert_eq!(titles(&curated), vec!["e", "a"]);
    }

    #[tokio::test]
    async fn test_long_reranker_output_truncated() {
        let mut reranker = MockReranker::new();
        reranker
            .expect_rerank()
            .returning(|_, articles, _| Ok(articles.iter().rev().cloned().collect()));

        let curated = NewsCurator::with_reranker(Arc::new(reranker))
            .curate("AAPL", feed(), 2)
            .await;
        assert_eq!(titles(&curated), vec!["e", "d"]);
    }

    #[tokio::test]
    async fn test_reranker_error_falls_back() {
        let mut reranker = MockReranker::new();
        reranker
            .expect_rerank()
            .returning(|_, _, _| Err(InsightError::ModelUnavailable("down".to_string())));

        let curated = NewsCurator::with_reranker(Arc::new(reranker))
            .curate("AAPL", feed(), 3)
            .await;
        assert_eq!(titles(&curated), vec!["b", "d", "a"]);
    }

    #[tokio::test]
    async fn test_fabricated_article_falls_back() {
        let mut reranker = MockReranker::new();
        reranker
            .expect_rerank()
            .returning(|_, articles, _| Ok(vec![articles[0].clone(), article("invented", 1.0)]));

        let curated = NewsCurator::with_reranker(Arc::new(reranker))
            .curate("AAPL", feed(), 3)
            .await;
        assert_eq!(titles(&curated), vec!["b", "d", "a"]);
    }

    #[tokio::test]
    async fn test_altered_article_falls_back() {
        let mut reranker = MockReranker::new();
        reranker.expect_rerank().returning(|_, articles, _| {
            let mut changed = articles[1].clone();
            changed.summary = Some("rewritten".to_string());
            Ok(vec![changed])
        });

        let curated = NewsCurator::with_reranker(Arc::new(reranker))
            .curate("AAPL", feed(), 3)
            .await;
        assert_eq!(titles(&curated), vec!["b", "d", "a"]);
    }

    #[tokio::test]
    async fn test_duplicated_article_falls_back() {
        let mut reranker = MockReranker::new();
        reranker
            .expect_rerank()
            .returning(|_, articles, _| Ok(vec![articles[1].clone(), articles[1].clone()]));

        let curated = NewsCurator::with_reranker(Arc::new(reranker))
            .curate("AAPL", feed(), 3)
            .await;
        assert_eq!(titles(&curated), vec!["b", "d", "a"]);
    }

    #[tokio::test]
    async fn test_input_duplicates_may_both_be_selected() {
        let mut input = feed();
        input.push(article("b", 1.0));

        let mut reranker = MockReranker::new();
        reranker
            .expect_rerank()
            .returning(|_, articles, _| Ok(vec![articles[1].clone(), articles[5].clone()]));

        let curated = NewsCurator::with_reranker(Arc::new(reranker))
            .curate("AAPL", input, 3)
            .await;
        assert_eq!(titles(&curated), vec!["b", "b"]);
    }

    #[tokio::test]
    async fn test_empty_selection_falls_back() {
        let mut reranker = MockReranker::new();
        reranker.expect_rerank().returning(|_, _, _| Ok(Vec::new()));

        let curated = NewsCurator::with_reranker(Arc::new(reranker))
            .curate("AAPL", feed(), 1)
            .await;
        assert_eq!(titles(&curated), vec!["b"]);
    }

    #[test]
    fn test_rank_by_score_keeps_feed_order_for_ties() {
        let ranked = rank_by_score(feed(), 5);
        assert_eq!(titles(&ranked), vec!["b", "d", "a", "c", "e"]);
    }
}
