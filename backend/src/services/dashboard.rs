//! Composite dashboard load.
//!
//! Current conditions come first since air quality is keyed by their
//! coordinates. After that, air quality, weather history and the daily
//! forecast are independent and run concurrently; each reports its own
//! failure without affecting the others.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use tracing::{debug, warn};

use crate::db::repository::HistoryRepository;
use crate::models::{CalendarDate, DailyForecastSummary, DatedRecord};
use crate::services::forecast::{bucketize, samples_from_payload};
use crate::services::history::weather_history;
use crate::upstream::{Coordinates, UpstreamResult, WeatherProvider};

/// Outcome of one independent dashboard part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Section<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }

    fn from_result<E: Display>(name: &str, result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                warn!(section = name, error = %e, "Dashboard section failed");
                Self::failed(e.to_string())
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything the dashboard shows for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub current: Value,
    pub air_quality: Section<Value>,
    pub history: Section<Vec<DatedRecord>>,
    pub forecast: Section<Vec<DailyForecastSummary>>,
}

/// Load the dashboard for `city`.
///
/// # Errors
/// Only a failure to fetch current conditions fails the whole load.
pub async fn load_dashboard(
    provider: &dyn WeatherProvider,
    repo: &dyn HistoryRepository,
    city: &str,
    history_window: usize,
    today: CalendarDate,
) -> UpstreamResult<Dashboard> {
    let current = provider.current_weather(city).await?;
    debug!(city, "Loaded current conditions");

    let air_quality = async {
        let coords = Coordinates::from_current(&current)?;
        provider.air_quality(coords).await
    };
    let history = weather_history(repo, city, history_window, today);
    let forecast = async {
        let payload = provider.forecast(city).await?;
        UpstreamResult::Ok(bucketize(&samples_from_payload(&payload), today))
    };

    let (air_quality, history, forecast) = tokio::join!(air_quality, history, forecast);

    Ok(Dashboard {
        air_quality: Section::from_result("air_quality", air_quality),
        history: Section::from_result("history", history),
        forecast: Section::from_result("forecast", forecast),
        current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::upstream::UpstreamError;
    use async_trait::async_trait;
    use serde_json::json;

    struct FakeProvider {
        fail_current: bool,
        fail_forecast: bool,
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_weather(&self, city: &str) -> UpstreamResult<Value> {
            if self.fail_current {
                return Err(UpstreamError::CityNotFound(city.to_string()));
            }
            Ok(json!({"name": city, "coord": {"lat": 12.97, "lon": 77.59}}))
        }

        async fn air_quality(&self, coords: Coordinates) -> UpstreamResult<Value> {
            Ok(json!({"coord": coords, "list": [{"main": {"aqi": 2}}]}))
        }

        async fn forecast(&self, _city: &str) -> UpstreamResult<Value> {
            if self.fail_forecast {
                return Err(UpstreamError::Status {
                    status: 503,
                    message: "busy".to_string(),
                });
            }
            Ok(json!({"list": [
                {"dt_txt": "2024-05-02 15:00:00", "main": {"temp_min": 20.0, "temp_max": 30.0}, "weather": [{"icon": "01n"}]}
            ]}))
        }
    }

    fn today() -> CalendarDate {
        CalendarDate::from_ymd(2024, 5, 1).unwrap()
    }

    fn repo() -> LocalRepository {
        LocalRepository::from_snapshot_str(
            r#"{"weatherHistory": [
                {"city": "bangalore", "date": "2023-01-01", "temperature_2m_max": 28.1},
                {"city": "bangalore", "date": "2023-01-02", "temperature_2m_max": 29.4}
            ]}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_full_dashboard() {
        let provider = FakeProvider { fail_current: false, fail_forecast: false };
        let dashboard = load_dashboard(&provider, &repo(), "Bengaluru", 30, today())
            .await
            .unwrap();

        assert_eq!(dashboard.current["name"], "Bengaluru");
        assert_eq!(dashboard.air_quality.data.as_ref().unwrap()["coord"]["lat"], 12.97);
        assert_eq!(dashboard.history.data.as_ref().unwrap().len(), 2);
        let forecast = dashboard.forecast.data.unwrap();
        assert_eq!(forecast.len(), 1);
        assert_eq!(forecast[0].icon_code, "01d");
    }

    #[tokio::test]
    async fn test_section_failures_are_isolated() {
        let provider = FakeProvider { fail_current: false, fail_forecast: true };
        let dashboard = load_dashboard(&provider, &repo(), "Paris", 30, today())
            .await
            .unwrap();

        assert!(dashboard.air_quality.is_ok());
        assert!(dashboard.history.error.is_some());
        assert!(dashboard.forecast.error.as_deref().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_current_failure_fails_load() {
        let provider = FakeProvider { fail_current: true, fail_forecast: false };
        let err = load_dashboard(&provider, &repo(), "Atlantis", 30, today())
            .await
            .unwrap_err();
        assert!(err.is_city_not_found());
    }

    #[test]
    fn test_section_serialization() {
        let ok = serde_json::to_value(Section::ok(1)).unwrap();
        assert_eq!(ok, json!({"data": 1}));
        let failed = serde_json::to_value(Section::<i32>::failed("boom")).unwrap();
        assert_eq!(failed, json!({"error": "boom"}));
    }
}
