//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::HistoryConfig;
use crate::db::repository::HistoryRepository;
use crate::upstream::WeatherProvider;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Historical record store
    pub repository: Arc<dyn HistoryRepository>,
    /// Live weather provider
    pub provider: Arc<dyn WeatherProvider>,
    /// Window sizes for history and prediction
    pub history: HistoryConfig,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn HistoryRepository>,
        provider: Arc<dyn WeatherProvider>,
        history: HistoryConfig,
    ) -> Self {
        Self {
            repository,
            provider,
            history,
        }
    }
}
