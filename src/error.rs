use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Outbound request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoding failed: {0}")]
    Geocoding(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized")]
    Unauthorized,
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Http(ref e) => {
                tracing::error!("Outbound request error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Geocoding(ref msg) => {
                tracing::error!("Geocoding failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Location lookup failed".to_string(),
                )
            }
            AppError::Calendar(ref msg) => {
                tracing::error!("Calendar error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Scheduling failed: {}", msg),
                )
            }
            AppError::ExternalService(ref msg) => {
                tracing::error!("External service error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        };

        let body = Json(json!({
            "success": false,
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
