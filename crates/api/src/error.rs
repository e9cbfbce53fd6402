use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::models::{Analysis, TokenData};
use std::fmt;
use tracing::error;

/// Error type for the HTTP layer
#[derive(Debug)]
pub enum ApiError {
    // Request errors
    ValidationError(String),

    // Narrative analysis errors
    AnalysisServiceError(String),

    // Internal errors
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::AnalysisServiceError(msg) => write!(f, "Analysis service error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error body. Keeps the `analysis` / `risk_score` / `data` keys of a
/// successful response so the page can render empty sections.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub analysis: Analysis,
    pub risk_score: Option<f64>,
    pub data: TokenData,
    pub timestamp: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            ApiError::AnalysisServiceError(msg) => {
                error!("Analysis service error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "analysis_service_error",
                    msg.clone(),
                )
            }
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Failed to analyze contract".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            analysis: Analysis::error(),
            risk_score: None,
            data: TokenData::default(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        match err {
            shared::Error::Validation(msg) => ApiError::ValidationError(msg),
            shared::Error::AnalysisService(msg) => ApiError::AnalysisServiceError(msg),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
