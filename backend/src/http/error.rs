//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::db::repository::RepositoryError;
use crate::upstream::UpstreamError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (missing or malformed parameter)
    BadRequest(String),
    /// History store error
    Repository(RepositoryError),
    /// Weather provider error
    Upstream(UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Repository(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", e.message()))
            }
            AppError::Repository(e) => {
                error!(error = %e, "History store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("REPOSITORY_ERROR", "Error reading history data")
                        .with_details(e.to_string()),
                )
            }
            AppError::Upstream(UpstreamError::CityNotFound(_)) => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", "City not found"))
            }
            AppError::Upstream(e @ UpstreamError::MissingApiKey) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("UPSTREAM_NOT_CONFIGURED", e.to_string()),
            ),
            AppError::Upstream(e) => {
                error!(error = %e, "Weather provider error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("UPSTREAM_ERROR", "Error fetching weather data")
                        .with_details(e.to_string()),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err)
    }
}
