//! HTTP error mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use stockscope_core::InsightError;
use tracing::{error, warn};

/// Errors a handler can return
#[derive(Debug)]
pub enum ApiError {
    /// Request failed validation (422)
    Validation(String),
    /// Market data could not be fetched (502)
    Upstream(String),
    /// Anything else (500)
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Upstream(_) => "upstream_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::Upstream(m) | Self::Internal(m) => m,
        }
    }
}

impl From<InsightError> for ApiError {
    fn from(err: InsightError) -> Self {
        match err {
            InsightError::InvalidInput(m) => Self::Validation(m),
            InsightError::DataUnavailable(m) => Self::Upstream(m),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(m) => error!(message = %m, "request failed"),
            other => {
                warn!(status = status.as_u16(), message = %other.message(), "request rejected");
            }
        }

        let body = ErrorBody {
            error: self.kind(),
            message: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
