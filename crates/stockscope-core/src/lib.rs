//! Price and news pipeline for stockscope
//!
//! This crate turns raw market data into ranked, summarized results:
//!
//! - [`api`]: the [`MarketData`] gateway and its Alpha Vantage implementation
//! - [`news`]: keyword scoring, curation and optional model reranking
//! - [`summarizer`]: short synopses of curated news
//! - [`answerer`]: free-text answers from the latest close and headlines
//!
//! Every model-backed step has a deterministic fallback, so a missing or
//! failing language model degrades output instead of failing requests.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stockscope_core::{
//!     AlphaVantageClient, InsightConfig, MarketData, NewsCurator, Summarizer, prompts,
//! };
//! use stockscope_utils::EnvSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = InsightConfig::from_source(&EnvSource::with_file(".env")?)?;
//!     let gateway = AlphaVantageClient::new(&config)?;
//!     let generator = stockscope_core::model::build_generator(&config)?;
//!     let prompts = Arc::new(prompts::default_registry()?);
//!
//!     let articles = gateway.fetch_news("AAPL").await?;
//!     let curated = NewsCurator::new().curate("AAPL", articles, 3).await;
//!     let summary = Summarizer::new(generator, prompts).summarize("AAPL", &curated).await;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

pub mod answerer;
pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod models;
pub mod news;
pub mod prompts;
pub mod summarizer;

// Re-export main types for convenience
pub use answerer::{AnswerOutcome, QuestionAnswerer, compute_sources};
pub use api::{AlphaVantageClient, MarketData};
pub use config::{InsightConfig, ModelProvider};
pub use error::{InsightError, Result};
pub use models::{AskAnswer, NewsArticle, PricePoint, PriceRange, RawNewsItem, RelevanceScore};
pub use news::{LlmReranker, NewsCurator, Reranker};
pub use summarizer::Summarizer;

#[cfg(any(test, feature = "mock"))]
pub use api::MockMarketData;
#[cfg(any(test, feature = "mock"))]
pub use news::MockReranker;
