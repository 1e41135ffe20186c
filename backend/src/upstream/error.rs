//! Upstream provider errors.

use thiserror::Error;

/// Failure talking to the weather provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// No API key configured; live endpoints cannot be served.
    #[error("Weather provider API key is not configured")]
    MissingApiKey,

    /// The provider does not know the requested city.
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Any other non-success status.
    #[error("Weather provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Weather provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected weather provider payload: {0}")]
    Decode(String),
}

impl UpstreamError {
    pub fn is_city_not_found(&self) -> bool {
        matches!(self, UpstreamError::CityNotFound(_))
    }
}

/// Result alias for provider calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
