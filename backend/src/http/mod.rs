//! HTTP server module.
//!
//! An axum REST façade over the service layer, the history repository and
//! the upstream weather provider.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query/path extraction and validation                   │
//! │  - JSON serialization, CORS, compression, error mapping   │
//! └───────────────┬──────────────────────────┬───────────────┘
//!                 │                          │
//! ┌───────────────▼──────────────┐ ┌─────────▼───────────────┐
//! │  Services (services/)         │ │  Upstream (upstream/)   │
//! │  - city, reindex, forecast,   │ │  - WeatherProvider      │
//! │    predict, dashboard         │ │  - OpenWeatherClient    │
//! └───────────────┬──────────────┘ └─────────────────────────┘
//!                 │
//! ┌───────────────▼──────────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - HistoryRepository / LocalRepository snapshot           │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
