//! Historical record types shared by the store, the accessor and the API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::time::CalendarDate;

/// One of the two independent historical collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    /// Daily weather observations (max temperature, rain, ...)
    Weather,
    /// Daily air-quality index readings
    AirQuality,
}

impl Series {
    pub fn as_str(&self) -> &'static str {
        match self {
            Series::Weather => "weather",
            Series::AirQuality => "air_quality",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Series {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weather" => Ok(Self::Weather),
            "aqi" | "air_quality" | "air-quality" => Ok(Self::AirQuality),
            _ => Err(format!("Unknown series: {}", s)),
        }
    }
}

/// A dated reading for one city in one series.
///
/// Serializes flat: `{"city": ..., "date": ..., "<field>": <value>, ...}`.
/// Only numeric stored fields (numbers and numeric strings) are carried as
/// measurements; text, booleans and nested values in the stored document are
/// omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedRecord {
    pub city: String,
    pub date: CalendarDate,
    #[serde(flatten)]
    pub measurements: BTreeMap<String, f64>,
}

impl DatedRecord {
    pub fn new(city: impl Into<String>, date: CalendarDate) -> Self {
        Self {
            city: city.into(),
            date,
            measurements: BTreeMap::new(),
        }
    }

    /// Builder-style measurement insert.
    pub fn with_measurement(mut self, field: impl Into<String>, value: f64) -> Self {
        self.measurements.insert(field.into(), value);
        self
    }

    /// Value of `field`, zero when absent.
    pub fn measurement(&self, field: &str) -> f64 {
        self.measurements.get(field).copied().unwrap_or(0.0)
    }
}

/// Normalized air-quality history point. The shape is fixed regardless of how
/// the store names its fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AqiPoint {
    pub date: CalendarDate,
    pub aqi: f64,
}
