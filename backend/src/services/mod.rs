//! Domain services.
//!
//! Pure transformations over history and forecast data, plus the async
//! compositions the HTTP handlers call. Nothing here knows about HTTP.

pub mod city;
pub mod dashboard;
pub mod forecast;
pub mod history;
pub mod predict;
pub mod reindex;

pub use city::resolve_city;
pub use dashboard::{load_dashboard, Dashboard, Section};
pub use forecast::{bucketize, normalize_icon, samples_from_payload};
pub use history::{aqi_history, prediction_baseline, weather_history};
pub use predict::{predict, PREDICTION_HORIZON_DAYS};
pub use reindex::reindex_to_today;
