//! Service configuration
//!
//! [`InsightConfig`] is built once at startup, either through the builder or
//! from an [`EnvSource`], and then handed to the gateway and model
//! constructors. Nothing else reads the environment.

use crate::error::{InsightError, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use stockscope_llm::providers::{
    DEFAULT_ANTHROPIC_MODEL, DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_MODEL,
};
use stockscope_utils::EnvSource;

/// Default Alpha Vantage query endpoint
pub const DEFAULT_ALPHAVANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_NEWS_FEED_LIMIT: u32 = 50;

/// Language model backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelProvider {
    #[default]
    Gemini,
    OpenAI,
    Anthropic,
}

impl ModelProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Model used when none is configured
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_MODEL,
            Self::OpenAI => DEFAULT_OPENAI_MODEL,
            Self::Anthropic => DEFAULT_ANTHROPIC_MODEL,
        }
    }

    /// Setting that holds this provider's API key
    pub fn key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Setting that holds this provider's model name
    pub fn model_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_MODEL",
            Self::OpenAI => "OPENAI_MODEL",
            Self::Anthropic => "ANTHROPIC_MODEL",
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelProvider {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAI),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(InsightError::Config(format!(
                "unknown LLM_PROVIDER '{other}', expected gemini, openai or anthropic"
            ))),
        }
    }
}

/// Configuration for the gateway and the language model
#[derive(Clone)]
pub struct InsightConfig {
    /// Alpha Vantage API key (required)
    pub alpha_vantage_api_key: String,

    /// Alpha Vantage query endpoint
    pub alpha_vantage_base_url: String,

    /// Per-call timeout for market data requests
    pub market_data_timeout: Duration,

    /// `limit` sent with news feed requests
    pub news_feed_limit: u32,

    /// Which language model backend to use
    pub model_provider: ModelProvider,

    /// API key for the model backend; `None` runs every model fallback
    pub model_api_key: Option<String>,

    /// Model name sent with every request
    pub model_name: String,

    /// Custom base URL for OpenAI-compatible endpoints
    pub openai_api_base: Option<String>,

    /// Rank news with the language model before the keyword fallback
    pub llm_rerank: bool,
}

impl fmt::Debug for InsightConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightConfig")
            .field("alpha_vantage_api_key", &"<redacted>")
            .field("alpha_vantage_base_url", &self.alpha_vantage_base_url)
            .field("market_data_timeout", &self.market_data_timeout)
            .field("news_feed_limit", &self.news_feed_limit)
            .field("model_provider", &self.model_provider)
            .field("model_api_key", &self.model_api_key.as_ref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("openai_api_base", &self.openai_api_base)
            .field("llm_rerank", &self.llm_rerank)
            .finish()
    }
}

impl InsightConfig {
    /// Create a new configuration builder
    pub fn builder() -> InsightConfigBuilder {
        InsightConfigBuilder::default()
    }

    /// Build the configuration from environment-style settings
    pub fn from_source(source: &EnvSource) -> Result<Self> {
        let alpha_vantage_api_key = source
            .get_any(&["ALPHAVANTAGE_API_KEY", "ALPHA_VANTAGE_API_KEY"])
            .ok_or_else(|| {
                InsightError::Config("Missing required setting: ALPHAVANTAGE_API_KEY".to_string())
            })?;

        let model_provider = source
            .get("LLM_PROVIDER")
            .map(|v| v.parse::<ModelProvider>())
            .transpose()?
            .unwrap_or_default();

        let mut builder = Self::builder()
            .alpha_vantage_api_key(alpha_vantage_api_key)
            .model_provider(model_provider);

        if let Some(url) = source.get("ALPHAVANTAGE_BASE_URL") {
            builder = builder.alpha_vantage_base_url(url);
        }
        if let Some(secs) = source.get("MARKET_DATA_TIMEOUT_SECS") {
            builder = builder.market_data_timeout(Duration::from_secs(parse_setting(
                "MARKET_DATA_TIMEOUT_SECS",
                &secs,
            )?));
        }
        if let Some(limit) = source.get("NEWS_FEED_LIMIT") {
            builder = builder.news_feed_limit(parse_setting("NEWS_FEED_LIMIT", &limit)?);
        }
        if let Some(key) = source.get(model_provider.key_var()) {
            builder = builder.model_api_key(key);
        }
        if let Some(model) = source.get(model_provider.model_var()) {
            builder = builder.model_name(model);
        }
        if let Some(base) = source.get("OPENAI_API_BASE") {
            builder = builder.openai_api_base(base);
        }
        if let Some(flag) = source.get("LLM_RERANK") {
            builder = builder.llm_rerank(parse_flag("LLM_RERANK", &flag)?);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.alpha_vantage_api_key.trim().is_empty() {
            return Err(InsightError::Config(
                "Alpha Vantage API key must not be empty".to_string(),
            ));
        }

        if self.market_data_timeout.is_zero() {
            return Err(InsightError::Config(
                "market data timeout must be greater than 0".to_string(),
            ));
        }

        if self.news_feed_limit == 0 {
            return Err(InsightError::Config(
                "news feed limit must be greater than 0".to_string(),
            ));
        }

        if self.model_name.trim().is_empty() {
            return Err(InsightError::Config(
                "model name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_setting<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| InsightError::Config(format!("{name} has invalid value '{value}'")))
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(InsightError::Config(format!(
            "{name} has invalid value '{value}', expected true or false"
        ))),
    }
}

/// Builder for InsightConfig
#[derive(Debug, Default)]
pub struct InsightConfigBuilder {
    alpha_vantage_api_key: Option<String>,
    alpha_vantage_base_url: Option<String>,
    market_data_timeout: Option<Duration>,
    news_feed_limit: Option<u32>,
    model_provider: Option<ModelProvider>,
    model_api_key: Option<String>,
    model_name: Option<String>,
    openai_api_base: Option<String>,
    llm_rerank: Option<bool>,
}

impl InsightConfigBuilder {
    /// Set the Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set the Alpha Vantage endpoint
    pub fn alpha_vantage_base_url(mut self, url: impl Into<String>) -> Self {
        self.alpha_vantage_base_url = Some(url.into());
        self
    }

    /// Set the market data timeout
    pub fn market_data_timeout(mut self, timeout: Duration) -> Self {
        self.market_data_timeout = Some(timeout);
        self
    }

    /// Set the news feed limit
    pub fn news_feed_limit(mut self, limit: u32) -> Self {
        self.news_feed_limit = Some(limit);
        self
    }

    /// Set the model backend
    pub fn model_provider(mut self, provider: ModelProvider) -> Self {
        self.model_provider = Some(provider);
        self
    }

    /// Set the model API key
    pub fn model_api_key(mut self, key: impl Into<String>) -> Self {
        self.model_api_key = Some(key.into());
        self
    }

    /// Set the model name
    pub fn model_name(mut self, model: impl Into<String>) -> Self {
        self.model_name = Some(model.into());
        self
    }

    /// Set an OpenAI-compatible base URL
    pub fn openai_api_base(mut self, base: impl Into<String>) -> Self {
        self.openai_api_base = Some(base.into());
        self
    }

    /// Enable or disable language model reranking
    pub fn llm_rerank(mut self, enabled: bool) -> Self {
        self.llm_rerank = Some(enabled);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<InsightConfig> {
        let model_provider = self.model_provider.unwrap_or_default();

        let config = InsightConfig {
            alpha_vantage_api_key: self.alpha_vantage_api_key.unwrap_or_default(),
            alpha_vantage_base_url: self
                .alpha_vantage_base_url
                .unwrap_or_else(|| DEFAULT_ALPHAVANTAGE_BASE_URL.to_string()),
            market_data_timeout: self
                .market_data_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            news_feed_limit: self.news_feed_limit.unwrap_or(DEFAULT_NEWS_FEED_LIMIT),
            model_provider,
            model_api_key: self.model_api_key.filter(|k| !k.trim().is_empty()),
            model_name: self
                .model_name
                .unwrap_or_else(|| model_provider.default_model().to_string()),
            openai_api_base: self.openai_api_base,
            llm_rerank: self.llm_rerank.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}
