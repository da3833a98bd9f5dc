//! News scoring, ranking and reranking

pub mod curator;
pub mod reranker;
pub mod scorer;

pub use curator::{NewsCurator, Reranker, rank_by_score};
pub use reranker::LlmReranker;
pub use scorer::{KEYWORD_REASON, score};

#[cfg(any(test, feature = "mock"))]
pub use curator::MockReranker;
