//! Repository factory for dependency injection.
//!
//! Handlers only ever see `Arc<dyn HistoryRepository>`; this module decides
//! what stands behind it.

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::repositories::LocalRepository;
use super::repository::{HistoryRepository, RepositoryResult};
use crate::config::HistoryConfig;

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create an empty in-memory repository.
    pub fn create_local() -> Arc<dyn HistoryRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Load a snapshot file, failing on any read or parse problem.
    pub fn try_from_snapshot<P: AsRef<Path>>(
        path: P,
    ) -> RepositoryResult<Arc<dyn HistoryRepository>> {
        let repo = LocalRepository::from_snapshot_file(path)?;
        Ok(Arc::new(repo))
    }

    /// Load a snapshot file, degrading to an empty store on failure.
    ///
    /// History is advisory, so a bad or missing export must not keep the
    /// live-data endpoints from starting. Every history request will then
    /// report "not found".
    pub fn from_snapshot<P: AsRef<Path>>(path: P) -> Arc<dyn HistoryRepository> {
        let path = path.as_ref();
        match Self::try_from_snapshot(path) {
            Ok(repo) => {
                info!(path = %path.display(), "History snapshot loaded");
                repo
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "History snapshot unavailable, serving empty history");
                Self::create_local()
            }
        }
    }

    /// Create the repository described by the `[history]` config section.
    pub fn from_config(config: &HistoryConfig) -> Arc<dyn HistoryRepository> {
        Self::from_snapshot(&config.snapshot_path)
    }
}
