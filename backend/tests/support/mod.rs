#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use weather_dash::config::HistoryConfig;
use weather_dash::db::repositories::LocalRepository;
use weather_dash::http::{create_router, AppState};
use weather_dash::models::CalendarDate;
use weather_dash::upstream::{Coordinates, UpstreamError, UpstreamResult, WeatherProvider};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// `count` weather documents for `city`, dated out of order over 2022.
pub fn weather_docs(city: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let day = CalendarDate::from_ymd(2022, 1, 1)
                .unwrap()
                .plus_days(((i * 7) % 300) as u64 + (i / 300) as u64);
            json!({
                "city": city,
                "date": day.to_string(),
                "temperature_2m_max": 20.0 + i as f64 / 10.0,
                "precipitation_sum": "1.5",
            })
        })
        .collect()
}

/// `count` air-quality documents for `city` in the stored Title case.
pub fn aqi_docs(city: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let day = CalendarDate::from_ymd(2023, 3, 1).unwrap().plus_days(i as u64);
            json!({"City": city, "Date": day.to_iso_string(), "AQI": 40 + i})
        })
        .collect()
}

pub fn snapshot_json(weather: Vec<Value>, aqi: Vec<Value>) -> String {
    json!({"weatherHistory": weather, "aqiHistory": aqi}).to_string()
}

pub fn bangalore_repository() -> LocalRepository {
    let mut aqi = aqi_docs("Bengaluru", 5);
    // AQI missing on the newest reading
    if let Some(Value::Object(doc)) = aqi.last_mut() {
        doc.remove("AQI");
    }
    LocalRepository::from_snapshot_str(&snapshot_json(weather_docs("bangalore", 45), aqi))
        .expect("fixture snapshot")
}

/// A provider forecast payload with eight 3-hourly samples per day, starting
/// today and running `days` days.
pub fn forecast_payload(today: CalendarDate, days: u64) -> Value {
    let mut list = Vec::new();
    for d in 0..days {
        let date = today.plus_days(d);
        for slot in 0..8u32 {
            let icon = if slot == 5 { "01n" } else { "04d" };
            list.push(json!({
                "dt_txt": format!("{} {:02}:00:00", date, slot * 3),
                "main": {"temp_min": 10.0 + slot as f64, "temp_max": 12.0 + slot as f64},
                "weather": [{"icon": icon}],
            }));
        }
    }
    json!({"cod": "200", "list": list})
}

// =============================================================================
// Stub provider
// =============================================================================

/// In-process [`WeatherProvider`] with canned answers.
///
/// Cities not in `known_cities` get `CityNotFound`; every call is counted.
pub struct StubProvider {
    pub known_cities: Vec<String>,
    pub forecast: Value,
    pub calls: AtomicUsize,
    pub fail_air_quality: bool,
}

impl StubProvider {
    pub fn new(known_cities: &[&str]) -> Self {
        Self {
            known_cities: known_cities.iter().map(|c| c.to_lowercase()).collect(),
            forecast: forecast_payload(CalendarDate::today(), 7),
            calls: AtomicUsize::new(0),
            fail_air_quality: false,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_city(&self, city: &str) -> UpstreamResult<()> {
        if self.known_cities.contains(&city.to_lowercase()) {
            Ok(())
        } else {
            Err(UpstreamError::CityNotFound(city.to_string()))
        }
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current_weather(&self, city: &str) -> UpstreamResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_city(city)?;
        Ok(json!({
            "name": city,
            "coord": {"lat": 12.97, "lon": 77.59},
            "main": {"temp": 27.3},
        }))
    }

    async fn air_quality(&self, coords: Coordinates) -> UpstreamResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_air_quality {
            return Err(UpstreamError::Status {
                status: 500,
                message: "air quality service down".to_string(),
            });
        }
        Ok(json!({"coord": {"lat": coords.lat, "lon": coords.lon}, "list": [{"main": {"aqi": 3}}]}))
    }

    async fn forecast(&self, city: &str) -> UpstreamResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_city(city)?;
        Ok(self.forecast.clone())
    }
}

// =============================================================================
// Router helpers
// =============================================================================

pub fn test_app(repo: LocalRepository, provider: Arc<StubProvider>) -> Router {
    let state = AppState::new(Arc::new(repo), provider, HistoryConfig::default());
    create_router(state)
}

/// GET `uri` and decode the JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
