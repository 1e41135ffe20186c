//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The dashboard is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Live data
        .route("/weather", get(handlers::get_weather))
        .route("/aqi", get(handlers::get_aqi))
        .route("/forecast", get(handlers::get_forecast))
        .route("/forecast/daily", get(handlers::get_daily_forecast))
        // History
        .route("/history/weather/{city}", get(handlers::get_weather_history))
        .route("/history/aqi/{city}", get(handlers::get_aqi_history))
        .route("/predict/{city}", get(handlers::get_prediction))
        // Composite
        .route("/dashboard", get(handlers::get_dashboard));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
