//! Route handlers

use crate::dto::{
    AskRequest, AskResponse, HealthResponse, NewsQuery, NewsResponse, PricesQuery, PricesResponse,
};
use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use std::sync::Arc;
use stockscope_core::{AnswerOutcome, PriceRange};
use tracing::{debug, instrument, warn};

pub type ApiResult<T> = Result<Json<T>, ApiError>;

const MAX_TICKER_LEN: usize = 10;
const DEFAULT_NEWS_LIMIT: usize = 3;
const MAX_NEWS_LIMIT: usize = 10;
const ASK_NEWS_LIMIT: usize = 5;
const MIN_QUESTION_LEN: usize = 5;
const MAX_QUESTION_LEN: usize = 500;

/// Returned by `/ask` when the model cannot answer
pub const ANSWER_UNAVAILABLE: &str = "Answer temporarily unavailable. Please try again shortly.";

fn validate_ticker(raw: Option<&str>) -> Result<String, ApiError> {
    let ticker = raw.map(str::trim).unwrap_or_default();
    if ticker.is_empty() || ticker.chars().count() > MAX_TICKER_LEN {
        return Err(ApiError::Validation(format!(
            "ticker must be 1-{MAX_TICKER_LEN} characters"
        )));
    }
    Ok(ticker.to_uppercase())
}

fn validate_limit(raw: Option<&str>) -> Result<usize, ApiError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_NEWS_LIMIT);
    };
    match raw.trim().parse::<usize>() {
        Ok(limit) if (1..=MAX_NEWS_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(ApiError::Validation(format!(
            "limit must be an integer between 1 and {MAX_NEWS_LIMIT}"
        ))),
    }
}

fn validate_question(raw: &str) -> Result<String, ApiError> {
    let question = raw.trim();
    let len = question.chars().count();
    if !(MIN_QUESTION_LEN..=MAX_QUESTION_LEN).contains(&len) {
        return Err(ApiError::Validation(format!(
            "question must be {MIN_QUESTION_LEN}-{MAX_QUESTION_LEN} characters"
        )));
    }
    Ok(question.to_string())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[instrument(skip_all)]
pub async fn prices(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PricesQuery>, QueryRejection>,
) -> ApiResult<PricesResponse> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let ticker = validate_ticker(query.ticker.as_deref())?;
    let range = match query.range.as_deref() {
        Some(raw) => raw.parse::<PriceRange>()?,
        None => PriceRange::default(),
    };

    let points = state.gateway.fetch_prices(&ticker, range).await?;
    debug!(ticker = %ticker, range = %range, points = points.len(), "prices served");

    Ok(Json(PricesResponse {
        ticker,
        range,
        points,
    }))
}

#[instrument(skip_all)]
pub async fn news(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> ApiResult<NewsResponse> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let ticker = validate_ticker(query.ticker.as_deref())?;
    let limit = validate_limit(query.limit.as_deref())?;

    let articles = state.gateway.fetch_news(&ticker).await?;
    let curated = state.curator().curate(&ticker, articles, limit).await;
    let summary = state.summarizer().summarize(&ticker, &curated).await;
    debug!(ticker = %ticker, articles = curated.len(), "news served");

    Ok(Json(NewsResponse {
        ticker,
        summary,
        articles: curated,
    }))
}

#[instrument(skip_all)]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> ApiResult<AskResponse> {
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let ticker = validate_ticker(Some(&request.ticker))?;
    let question = validate_question(&request.question)?;
    let range = request.range.unwrap_or_default();

    let prices = state
        .gateway
        .fetch_prices(&ticker, range)
        .await
        .unwrap_or_else(|e| {
            warn!(ticker = %ticker, error = %e, "prices unavailable, answering without them");
            Vec::new()
        });
    let articles = state.gateway.fetch_news(&ticker).await.unwrap_or_else(|e| {
        warn!(ticker = %ticker, error = %e, "news unavailable, answering without it");
        Vec::new()
    });

    let curated = state.curator().curate(&ticker, articles, ASK_NEWS_LIMIT).await;
    let outcome = state
        .answerer()
        .answer(&question, &ticker, range, &prices, &curated)
        .await;

    let (answer, sources) = match outcome {
        AnswerOutcome::Answered(answer) => (answer.text, answer.sources),
        AnswerOutcome::Unavailable { sources, .. } => (ANSWER_UNAVAILABLE.to_string(), sources),
    };

    Ok(Json(AskResponse {
        ticker,
        question,
        answer,
        sources,
    }))
}
