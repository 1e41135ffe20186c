//! Weather dashboard HTTP server binary.
//!
//! Loads configuration, the history snapshot and the upstream client, then
//! serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! OPENWEATHER_API_KEY=... cargo run --bin weather-server
//!
//! # Custom snapshot and port
//! HISTORY_SNAPSHOT_PATH=/data/history.json PORT=8080 \
//!   cargo run --bin weather-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`, `PORT`: bind address (default: 0.0.0.0:5001)
//! - `OPENWEATHER_API_KEY`: provider credential (live endpoints fail without it)
//! - `OPENWEATHER_BASE_URL`: provider base URL
//! - `HISTORY_SNAPSHOT_PATH`: history export to load
//! - `RUST_LOG`: Log level (default: info)
//!
//! A `.env` file in the working directory is read first.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use weather_dash::config::ServiceConfig;
use weather_dash::db;
use weather_dash::http::{create_router, AppState};
use weather_dash::upstream::OpenWeatherClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first so RUST_LOG from .env is honoured.
    let config = ServiceConfig::load(None)?;

    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting weather dashboard server");

    // Initialize global repository once and reuse it across the app
    db::init_repository(&config.history);
    let repository = Arc::clone(db::get_repository()?);
    info!(
        snapshot = %config.history.snapshot_path.display(),
        "History store initialized"
    );

    let provider = OpenWeatherClient::new(&config.upstream)?;
    if !provider.has_api_key() {
        warn!("OPENWEATHER_API_KEY is not set; live weather endpoints will fail");
    }

    let state = AppState::new(repository, Arc::new(provider), config.history.clone());
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
