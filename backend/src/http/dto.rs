//! Data Transfer Objects for the HTTP API.
//!
//! Response payloads mostly reuse the model types, which already derive
//! Serialize. This module holds the query parameter and health shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use crate::models::{AqiPoint, DailyForecastSummary, DatedRecord, PredictedDay};
pub use crate::services::Dashboard;

use super::error::AppError;
use crate::upstream::Coordinates;

/// Query parameters for city-keyed endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CityQuery {
    #[serde(default)]
    pub city: Option<String>,
}

impl CityQuery {
    /// The city, trimmed; blank counts as missing.
    pub fn require(&self) -> Result<&str, AppError> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::BadRequest("City is required".to_string()))
    }
}

/// Query parameters for the air-quality endpoint.
///
/// Kept as strings so a malformed number gets the same JSON 400 as a missing
/// one instead of the extractor's plain-text rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoordsQuery {
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
}

impl CoordsQuery {
    pub fn require(&self) -> Result<Coordinates, AppError> {
        let parse = |raw: &Option<String>| {
            raw.as_deref()
                .map(str::trim)
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        match (parse(&self.lat), parse(&self.lon)) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(AppError::BadRequest(
                "Latitude and Longitude are required".to_string(),
            )),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// History store status
    pub store: String,
    /// SHA-256 of the loaded history snapshot
    pub snapshot_checksum: Option<String>,
    /// Documents per history collection
    pub collections: BTreeMap<String, usize>,
}
