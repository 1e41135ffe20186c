//! Upstream weather provider.
//!
//! Live conditions, air quality and the sub-daily forecast come from an
//! external provider. Payloads are passed through as raw JSON; only the
//! forecast bucketizer and the dashboard look inside them.

pub mod error;
pub mod openweather;

pub use error::{UpstreamError, UpstreamResult};
pub use openweather::OpenWeatherClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geographic position used for air-quality lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Read `coord.lat` / `coord.lon` from a current-conditions payload.
    pub fn from_current(payload: &Value) -> UpstreamResult<Self> {
        let coord = payload
            .get("coord")
            .ok_or_else(|| UpstreamError::Decode("current conditions have no coord".to_string()))?;
        let lat = coord.get("lat").and_then(Value::as_f64);
        let lon = coord.get("lon").and_then(Value::as_f64);
        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(Self { lat, lon }),
            _ => Err(UpstreamError::Decode(format!(
                "coord is missing lat/lon: {}",
                coord
            ))),
        }
    }
}

/// Weather provider operations consumed by the HTTP layer.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a city.
    async fn current_weather(&self, city: &str) -> UpstreamResult<Value>;

    /// Current air quality at a position.
    async fn air_quality(&self, coords: Coordinates) -> UpstreamResult<Value>;

    /// Multi-day sub-daily forecast for a city.
    async fn forecast(&self, city: &str) -> UpstreamResult<Value>;
}
