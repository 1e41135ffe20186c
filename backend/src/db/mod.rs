//! Historical record store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (HTTP handlers, services/)           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Per-series field extraction (schema.rs)              │
//! │  - Recency window, oldest-first ordering                │
//! │  - NotFound vs. store failure                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │        Local Repository (in-memory)           │
//!     │   snapshot loaded once at startup             │
//!     └──────────────────────────────────────────────┘
//! ```

pub mod checksum;
pub mod factory;
pub mod repositories;
pub mod repository;
pub mod schema;
pub mod services;

pub use checksum::calculate_checksum;
pub use factory::RepositoryFactory;
pub use repositories::LocalRepository;
pub use repository::{
    Document, DocumentQuery, ErrorContext, HistoryRepository, RepositoryError, RepositoryResult,
};
pub use schema::{CityCase, SeriesSchema};
pub use services::fetch_recent;

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

use crate::config::HistoryConfig;

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn HistoryRepository>> = OnceLock::new();

/// Initialize the global repository from config. Later calls are no-ops.
///
/// Never fails: an unusable snapshot yields an empty store (see
/// [`RepositoryFactory::from_snapshot`]).
pub fn init_repository(config: &HistoryConfig) {
    REPOSITORY.get_or_init(|| RepositoryFactory::from_config(config));
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn HistoryRepository>> {
    REPOSITORY
        .get()
        .context("History store not initialized. Call init_repository() first.")
}
