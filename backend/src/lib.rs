//! # Weather Dashboard Backend
//!
//! REST backend for a weather and air-quality dashboard.
//!
//! Live readings are passed through from an upstream provider. Historical
//! views are served from a read-only snapshot of past records, normalized
//! into date-aligned series fit for charting, alongside a server-side
//! five-day forecast summary and a synthetic short-range predictor.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Calendar dates, history records and forecast value types
//! - [`db`]: Repository pattern over the history snapshot, per-series schemas
//! - [`services`]: City resolution, date reindexing, forecast bucketing,
//!   prediction and dashboard composition
//! - [`upstream`]: Weather provider trait and the OpenWeatherMap client
//! - [`config`]: Layered TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod upstream;

#[cfg(feature = "http-server")]
pub mod http;
