//! Alpha Vantage API client

use super::MarketData;
use crate::config::InsightConfig;
use crate::error::{InsightError, Result};
use crate::models::{NewsArticle, PricePoint, PriceRange, RawNewsItem};
use crate::news::scorer::{self, KEYWORD_REASON};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

const DAILY_SERIES_KEY: &str = "Time Series (Daily)";
const FEED_KEY: &str = "feed";

/// Keys the provider uses to report errors and throttling inside a 200 reply
const PROVIDER_MESSAGE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Alpha Vantage API client
#[derive(Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
    news_limit: String,
}

impl AlphaVantageClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(config: &InsightConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.market_data_timeout)
            .build()
            .map_err(|e| InsightError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client that shares an existing HTTP connection pool
    pub fn with_client(client: Client, config: &InsightConfig) -> Self {
        Self {
            client,
            api_key: config.alpha_vantage_api_key.clone(),
            base_url: config.alpha_vantage_base_url.clone(),
            news_limit: config.news_feed_limit.to_string(),
        }
    }

    /// One GET against the query endpoint, with provider errors checked
    async fn query(&self, params: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightError::DataUnavailable(format!(
                "Alpha Vantage request failed: HTTP {status}"
            )));
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body).map_err(|_| {
            InsightError::DataUnavailable("Alpha Vantage returned invalid JSON".to_string())
        })?;

        check_payload(&data)?;
        Ok(data)
    }
}

impl std::fmt::Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("base_url", &self.base_url)
            .field("news_limit", &self.news_limit)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MarketData for AlphaVantageClient {
    #[instrument(skip(self))]
    async fn fetch_prices(&self, ticker: &str, range: PriceRange) -> Result<Vec<PricePoint>> {
        let symbol = ticker.to_uppercase();
        let data = self
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol.as_str()),
                ("outputsize", "compact"),
            ])
            .await?;

        let points = parse_daily_series(&data, range, Utc::now().date_naive())?;
        debug!(points = points.len(), "fetched daily prices");
        Ok(points)
    }

    #[instrument(skip(self))]
    async fn fetch_news(&self, ticker: &str) -> Result<Vec<NewsArticle>> {
        let symbol = ticker.to_uppercase();
        let data = self
            .query(&[
                ("function", "NEWS_SENTIMENT"),
                ("tickers", symbol.as_str()),
                ("limit", self.news_limit.as_str()),
            ])
            .await?;

        let articles = normalize_feed(ticker, &data)?;
        debug!(articles = articles.len(), "fetched news feed");
        Ok(articles)
    }
}

/// Reject payloads that carry a provider error or rate-limit message
pub fn check_payload(data: &Value) -> Result<()> {
    let Some(object) = data.as_object() else {
        return Err(InsightError::DataUnavailable(
            "Alpha Vantage returned an unexpected payload".to_string(),
        ));
    };

    for key in PROVIDER_MESSAGE_KEYS {
        let message = match object.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if s.trim().is_empty() => continue,
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        return Err(InsightError::DataUnavailable(format!("Alpha Vantage error: {message}")));
    }

    Ok(())
}

/// Turn a `TIME_SERIES_DAILY` payload into points within `range` of `today`
pub fn parse_daily_series(
    data: &Value,
    range: PriceRange,
    today: NaiveDate,
) -> Result<Vec<PricePoint>> {
    let series = data
        .get(DAILY_SERIES_KEY)
        .and_then(Value::as_object)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            InsightError::DataUnavailable("Alpha Vantage returned no time series data".to_string())
        })?;

    let cutoff = range.cutoff(today);
    let mut points = Vec::with_capacity(series.len());

    for (day, values) in series {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| {
            InsightError::DataUnavailable(format!("Alpha Vantage returned invalid date '{day}'"))
        })?;
        if date < cutoff {
            continue;
        }

        points.push(PricePoint {
            date,
            open: field(values, "1. open")?,
            high: field(values, "2. high")?,
            low: field(values, "3. low")?,
            close: field(values, "4. close")?,
            volume: volume(values)?,
        });
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// Missing fields read as 0; anything present must be a finite number
fn field(values: &Value, key: &str) -> Result<f64> {
    let invalid =
        || InsightError::DataUnavailable(format!("Alpha Vantage returned non-numeric '{key}'"));

    let value = match values.get(key) {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid)?,
        Some(_) => return Err(invalid()),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

fn volume(values: &Value) -> Result<u64> {
    let volume = field(values, "5. volume")?;
    if volume < 0.0 {
        return Err(InsightError::DataUnavailable(format!(
            "Alpha Vantage returned negative volume {volume}"
        )));
    }
    Ok(volume.trunc() as u64)
}

/// Turn a `NEWS_SENTIMENT` payload into scored articles, keeping feed order
pub fn normalize_feed(ticker: &str, data: &Value) -> Result<Vec<NewsArticle>> {
    let feed = data
        .get(FEED_KEY)
        .and_then(Value::as_array)
        .filter(|f| !f.is_empty())
        .ok_or_else(|| {
            InsightError::DataUnavailable("Alpha Vantage returned no news data".to_string())
        })?;

    feed.iter()
        .map(|item| {
            let raw = RawNewsItem::deserialize(item).map_err(|e| {
                InsightError::DataUnavailable(format!(
                    "Alpha Vantage returned a malformed news item: {e}"
                ))
            })?;
            Ok(normalize_item(ticker, raw))
        })
        .collect()
}

fn normalize_item(ticker: &str, raw: RawNewsItem) -> NewsArticle {
    let trimmed = |s: Option<String>| s.map(|s| s.trim().to_string()).unwrap_or_default();

    let title = trimmed(raw.title);
    let url = trimmed(raw.url);
    let summary = trimmed(raw.summary);
    let relevance_score = scorer::score(ticker, &title, &summary);

    NewsArticle {
        title,
        url,
        source: raw.source,
        published_at: raw.time_published,
        summary: Some(summary),
        relevance_score,
        relevance_reason: Some(KEYWORD_REASON.to_string()),
    }
}
