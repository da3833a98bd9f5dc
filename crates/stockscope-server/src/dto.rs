//! Request and response bodies

use serde::{Deserialize, Serialize};
use stockscope_core::{NewsArticle, PricePoint, PriceRange};

#[derive(Debug, Deserialize)]
pub struct PricesQuery {
    pub ticker: Option<String>,
    pub range: Option<String>,
}

/// `limit` stays a string so a non-numeric value is a validation error
/// with our own message
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub ticker: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub ticker: String,
    #[serde(default)]
    pub range: Option<PriceRange>,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PricesResponse {
    pub ticker: String,
    pub range: PriceRange,
    pub points: Vec<PricePoint>,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub ticker: String,
    pub summary: String,
    pub articles: Vec<NewsArticle>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub ticker: String,
    pub question: String,
    pub answer: String,
    pub sources: Vec<String>,
}
