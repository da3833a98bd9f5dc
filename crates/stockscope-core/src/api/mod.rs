//! Market data gateway
//!
//! [`MarketData`] is the seam between the pipeline and the outside world;
//! [`AlphaVantageClient`] is the production implementation.

pub mod alpha_vantage;

pub use alpha_vantage::AlphaVantageClient;

use crate::error::Result;
use crate::models::{NewsArticle, PricePoint, PriceRange};
use async_trait::async_trait;

/// Source of daily prices and scored news for a ticker
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Daily bars within `range`, ascending by date
    async fn fetch_prices(&self, ticker: &str, range: PriceRange) -> Result<Vec<PricePoint>>;

    /// Normalized and keyword-scored articles, in feed order
    async fn fetch_news(&self, ticker: &str) -> Result<Vec<NewsArticle>>;
}
