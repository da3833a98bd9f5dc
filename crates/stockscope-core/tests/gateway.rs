//! Alpha Vantage client against a local stand-in server

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Days, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use stockscope_core::{AlphaVantageClient, InsightConfig, InsightError, MarketData, PriceRange};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/query")
}

fn client(base_url: &str) -> AlphaVantageClient {
    let config = InsightConfig::builder()
        .alpha_vantage_api_key("test-key")
        .alpha_vantage_base_url(base_url)
        .market_data_timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    AlphaVantageClient::new(&config).unwrap()
}

fn days_ago(n: u64) -> String {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(n))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string()
}

async fn fake_provider(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let param = |k: &str| params.get(k).map(String::as_str);
    if param("apikey") != Some("test-key") {
        return (StatusCode::BAD_REQUEST, Json(json!({}))).into_response();
    }

    match (param("function"), param("symbol"), param("tickers")) {
        (Some("TIME_SERIES_DAILY"), Some("AAPL"), None)
            if param("outputsize") == Some("compact") =>
        {
            let bar = |close: &str| {
                json!({
                    "1. open": "1",
                    "2. high": "2",
                    "3. low": "0.5",
                    "4. close": close,
                    "5. volume": "10"
                })
            };
            let mut series = serde_json::Map::new();
            series.insert(days_ago(0), bar("3.0"));
            series.insert(days_ago(20), bar("1.0"));
            series.insert(days_ago(3), bar("2.0"));
            Json(json!({ "Time Series (Daily)": series })).into_response()
        }
        (Some("NEWS_SENTIMENT"), None, Some("AAPL")) if param("limit") == Some("50") => Json(json!({
            "feed": [
                { "title": "Markets wrap", "url": "https://example.com/1", "summary": "" },
                { "title": "AAPL climbs", "url": "https://example.com/2", "summary": "iPhone" }
            ]
        }))
        .into_response(),
        _ => (StatusCode::BAD_REQUEST, Json(json!({}))).into_response(),
    }
}

#[tokio::test]
async fn test_fetch_prices_filters_and_sorts() {
    let url = serve(Router::new().route("/query", get(fake_provider))).await;

    let points = client(&url).fetch_prices("aapl", PriceRange::OneWeek).await.unwrap();

    let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
    assert_eq!(closes, vec![2.0, 3.0]);
    assert!(points[0].date < points[1].date);
}

#[tokio::test]
async fn test_fetch_news_scores_items() {
    let url = serve(Router::new().route("/query", get(fake_provider))).await;

    let articles = client(&url).fetch_news("aapl").await.unwrap();

    assert_eq!(articles.len(), 2);
    assert!((articles[0].relevance_score.value() - 0.3).abs() < f64::EPSILON);
    assert!((articles[1].relevance_score.value() - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_http_error_is_unavailable() {
    let url = serve(Router::new().route(
        "/query",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;

    let result = client(&url).fetch_prices("AAPL", PriceRange::OneMonth).await;
    assert!(matches!(result, Err(InsightError::DataUnavailable(ref m)) if m.contains("500")));
}

#[tokio::test]
async fn test_invalid_json_is_unavailable() {
    let url =
        serve(Router::new().route("/query", get(|| async { "<html>not json</html>" }))).await;

    let result = client(&url).fetch_news("AAPL").await;
    assert!(matches!(
        result,
        Err(InsightError::DataUnavailable(ref m)) if m.contains("invalid JSON")
    ));
}

#[tokio::test]
async fn test_rate_limit_note_is_unavailable() {
    let url = serve(Router::new().route(
        "/query",
        get(|| async {
            Json(json!({ "Note": "Our standard API rate limit is 25 requests per day." }))
        }),
    ))
    .await;

    let result = client(&url).fetch_prices("AAPL", PriceRange::OneMonth).await;
    assert!(matches!(
        result,
        Err(InsightError::DataUnavailable(ref m)) if m.contains("rate limit")
    ));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let url = serve(Router::new().route(
        "/query",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(Value::Null)
        }),
    ))
    .await;

    let result = client(&url).fetch_news("AAPL").await;
    assert!(matches!(result, Err(InsightError::DataUnavailable(_))));
}
