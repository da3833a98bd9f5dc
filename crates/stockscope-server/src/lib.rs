//! HTTP API for stockscope
//!
//! All routes live under `/api/v1`:
//!
//! - `GET /health`
//! - `GET /prices?ticker&range`
//! - `GET /news?ticker&limit`
//! - `POST /ask`

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use state::AppState;

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/prices", get(handlers::prices))
        .route("/news", get(handlers::news))
        .route("/ask", post(handlers::ask));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
