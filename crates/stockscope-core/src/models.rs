//! Domain types shared by the gateway, the curation pipeline and the server

use crate::error::{InsightError, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One daily price bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Lookback window for a price query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "1W")]
    OneWeek,
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "100D")]
    OneHundredDays,
}

impl PriceRange {
    /// Wire label (`1W`, `1M`, `100D`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::OneHundredDays => "100D",
        }
    }

    /// Window length in calendar days
    pub fn window_days(self) -> u64 {
        match self {
            Self::OneWeek => 7,
            Self::OneMonth => 31,
            Self::OneHundredDays => 100,
        }
    }

    /// Earliest date kept for this range, counted back from `today`
    pub fn cutoff(self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(self.window_days()))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceRange {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1W" => Ok(Self::OneWeek),
            "1M" => Ok(Self::OneMonth),
            "100D" => Ok(Self::OneHundredDays),
            other => Err(InsightError::InvalidInput(format!(
                "unsupported range '{other}', expected one of 1W, 1M, 100D"
            ))),
        }
    }
}

/// Relevance of an article to a ticker, always within `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RelevanceScore(f64);

impl RelevanceScore {
    /// Validate and wrap a score
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InsightError::InvalidInput(format!(
                "relevance score {value} is outside [0, 1]"
            )))
        }
    }

    /// Only for literals known to be in range
    pub(crate) const fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RelevanceScore {
    type Error = InsightError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RelevanceScore> for f64 {
    fn from(score: RelevanceScore) -> Self {
        score.0
    }
}

/// A normalized, scored news article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub relevance_score: RelevanceScore,
    #[serde(default)]
    pub relevance_reason: Option<String>,
}

impl NewsArticle {
    /// Summary text, or `None` when missing or blank
    pub fn summary_text(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One item of the provider's news feed, exactly as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNewsItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub time_published: Option<String>,
}

/// Answer text plus the article URLs it drew on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskAnswer {
    pub text: String,
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_range_windows() {
        assert_eq!(PriceRange::OneWeek.window_days(), 7);
        assert_eq!(PriceRange::OneMonth.window_days(), 31);
        assert_eq!(PriceRange::OneHundredDays.window_days(), 100);
        assert_eq!(PriceRange::default(), PriceRange::OneMonth);
    }

    #[test]
    fn test_range_cutoff() {
        let today = date("2024-03-10");
        assert_eq!(PriceRange::OneWeek.cutoff(today), date("2024-03-03"));
        assert_eq!(PriceRange::OneMonth.cutoff(today), date("2024-02-08"));
        assert_eq!(PriceRange::OneHundredDays.cutoff(today), date("2023-12-01"));
    }

    #[test]
    fn test_range_wire_names() {
        assert_eq!(serde_json::to_string(&PriceRange::OneWeek).unwrap(), "\"1W\"");
        assert_eq!(
            serde_json::from_str::<PriceRange>("\"100D\"").unwrap(),
            PriceRange::OneHundredDays
        );
        assert_eq!("1M".parse::<PriceRange>().unwrap(), PriceRange::OneMonth);
        assert_eq!(PriceRange::OneWeek.to_string(), "1W");
        assert!(matches!(
            "2Y".parse::<PriceRange>(),
            Err(InsightError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_relevance_score_bounds() {
        assert!(RelevanceScore::new(0.0).is_ok());
        assert!(RelevanceScore::new(1.0).is_ok());
        assert!(RelevanceScore::new(0.3).is_ok());
        assert!(RelevanceScore::new(-0.01).is_err());
        assert!(RelevanceScore::new(1.01).is_err());
        assert!(RelevanceScore::new(f64::NAN).is_err());
    }

    #[test]
    fn test_relevance_score_serde() {
        let score: RelevanceScore = serde_json::from_str("0.3").unwrap();
        assert!((score.value() - 0.3).abs() < f64::EPSILON);
        assert_eq!(serde_json::to_string(&score).unwrap(), "0.3");
        assert!(serde_json::from_str::<RelevanceScore>("1.5").is_err());
    }

    #[test]
    fn test_article_serializes_flat_score() {
        let article = NewsArticle {
            title: "AAPL rallies".to_string(),
            url: "https://example.com/a".to_string(),
            source: Some("Reuters".to_string()),
            published_at: None,
            summary: Some("Shares rose".to_string()),
            relevance_score: RelevanceScore::new(1.0).unwrap(),
            relevance_reason: Some("Keyword match score".to_string()),
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["relevance_score"], 1.0);
        assert_eq!(json["source"], "Reuters");
        assert!(json["published_at"].is_null());
    }

    #[test]
    fn test_summary_text() {
        let mut article = NewsArticle {
            title: "t".to_string(),
            url: String::new(),
            source: None,
            published_at: None,
            summary: Some("   ".to_string()),
            relevance_score: RelevanceScore::new(0.3).unwrap(),
            relevance_reason: None,
        };
        assert_eq!(article.summary_text(), None);

        article.summary = Some(" Beat estimates ".to_string());
        assert_eq!(article.summary_text(), Some("Beat estimates"));
    }

    #[test]
    fn test_price_point_date_format() {
        let point = PricePoint {
            date: date("2024-03-08"),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 100,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["date"], "2024-03-08");
        assert_eq!(json["volume"], 100);
    }
}
