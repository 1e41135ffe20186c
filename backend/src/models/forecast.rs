//! Forecast-side value types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::time::CalendarDate;

/// One sub-daily sample from the upstream forecast list.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    /// Provider-local wall-clock time of the sample.
    pub timestamp: NaiveDateTime,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Raw icon code as sent by the provider; `None` when absent.
    pub icon_code: Option<String>,
}

impl ForecastSample {
    pub fn date(&self) -> CalendarDate {
        CalendarDate::new(self.timestamp.date())
    }
}

/// One row of the five-day forecast card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastSummary {
    pub date: CalendarDate,
    pub day_name: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub icon_code: String,
}

/// Synthetic temperature for a day after today.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictedDay {
    pub date: CalendarDate,
    pub temperature: f64,
}
