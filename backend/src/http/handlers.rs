//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use tracing::debug;

use super::dto::{
    AqiPoint, CityQuery, CoordsQuery, DailyForecastSummary, Dashboard, DatedRecord,
    HealthResponse, PredictedDay,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::schema::WEATHER_SCHEMA;
use crate::db::services as db_services;
use crate::models::CalendarDate;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Service liveness plus the state of the history snapshot.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo = state.repository.as_ref();
    let store = match db_services::health_check(repo).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };
    let collections = db_services::collection_sizes(repo).await.unwrap_or_default();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
        snapshot_checksum: repo.snapshot_checksum(),
        collections,
    }))
}

// =============================================================================
// Live data (passthrough)
// =============================================================================

/// GET /api/weather?city=
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> HandlerResult<Value> {
    let city = query.require()?;
    Ok(Json(state.provider.current_weather(city).await?))
}

/// GET /api/aqi?lat=&lon=
pub async fn get_aqi(
    State(state): State<AppState>,
    Query(query): Query<CoordsQuery>,
) -> HandlerResult<Value> {
    let coords = query.require()?;
    Ok(Json(state.provider.air_quality(coords).await?))
}

/// GET /api/forecast?city=
///
/// Raw provider forecast; 404 when the provider does not know the city.
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> HandlerResult<Value> {
    let city = query.require()?;
    Ok(Json(state.provider.forecast(city).await?))
}

/// GET /api/forecast/daily?city=
///
/// Provider forecast collapsed into at most five future days.
pub async fn get_daily_forecast(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> HandlerResult<Vec<DailyForecastSummary>> {
    let city = query.require()?;
    let payload = state.provider.forecast(city).await?;
    let samples = services::samples_from_payload(&payload);
    debug!(city, samples = samples.len(), "Bucketizing forecast");
    Ok(Json(services::bucketize(&samples, CalendarDate::today())))
}

// =============================================================================
// History
// =============================================================================

/// GET /api/history/weather/{city}
pub async fn get_weather_history(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> HandlerResult<Vec<DatedRecord>> {
    let records = services::weather_history(
        state.repository.as_ref(),
        &city,
        state.history.history_window,
        CalendarDate::today(),
    )
    .await
    .map_err(|e| not_found_as(e, "No weather history found."))?;

    Ok(Json(records))
}

/// GET /api/history/aqi/{city}
pub async fn get_aqi_history(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> HandlerResult<Vec<AqiPoint>> {
    let points = services::aqi_history(
        state.repository.as_ref(),
        &city,
        state.history.history_window,
        CalendarDate::today(),
    )
    .await
    .map_err(|e| not_found_as(e, "No AQI history found."))?;

    Ok(Json(points))
}

/// GET /api/predict/{city}
///
/// Seven synthetic days after today; `[]` when the city has no history.
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> HandlerResult<Vec<PredictedDay>> {
    let history = services::prediction_baseline(
        state.repository.as_ref(),
        &city,
        state.history.prediction_window,
    )
    .await?;

    let predicted = services::predict(
        &history,
        WEATHER_SCHEMA.primary_field,
        CalendarDate::today(),
        &mut rand::thread_rng(),
    );
    Ok(Json(predicted))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /api/dashboard?city=
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> HandlerResult<Dashboard> {
    let city = query.require()?;
    let dashboard = services::load_dashboard(
        state.provider.as_ref(),
        state.repository.as_ref(),
        city,
        state.history.history_window,
        CalendarDate::today(),
    )
    .await?;
    Ok(Json(dashboard))
}

/// Replace the store's "no records" message with the endpoint's own.
fn not_found_as(err: crate::db::repository::RepositoryError, message: &str) -> AppError {
    if err.is_not_found() {
        AppError::NotFound(message.to_string())
    } else {
        AppError::Repository(err)
    }
}
