//! In-memory snapshot repository.
//!
//! Holds a read-only copy of the historical collections, loaded once at
//! startup from a JSON export shaped like
//! `{"weatherHistory": [{...}, ...], "aqiHistory": [{...}, ...]}`.
//! The data is shared behind an `Arc` and never mutated, so concurrent
//! queries need no locking.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use tracing::debug;

use crate::db::checksum::calculate_checksum;
use crate::db::repository::*;

/// In-memory local repository.
///
/// # Example
/// ```
/// use weather_dash::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::from_snapshot_str(
///     r#"{"weatherHistory": [{"city": "chennai", "date": "2024-05-01", "temperature_2m_max": 34.1}]}"#,
/// )
/// .unwrap();
/// assert_eq!(repo.document_count("weatherHistory"), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<LocalData>,
    healthy: Arc<AtomicBool>,
}

#[derive(Default)]
struct LocalData {
    collections: HashMap<String, Vec<Document>>,
    checksum: Option<String>,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::from_data(LocalData::default())
    }

    fn from_data(data: LocalData) -> Self {
        Self {
            data: Arc::new(data),
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Build a repository from collections already in memory.
    pub fn from_collections(collections: HashMap<String, Vec<Document>>) -> Self {
        Self::from_data(LocalData {
            collections,
            checksum: None,
        })
    }

    /// Parse a snapshot export.
    ///
    /// Top-level keys are collection names; each must map to an array of
    /// objects. Anything else is a configuration error.
    pub fn from_snapshot_str(content: &str) -> RepositoryResult<Self> {
        let context = || ErrorContext::new("load_snapshot");
        let root: Value = serde_json::from_str(content).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Snapshot is not valid JSON: {}", e),
                context(),
            )
        })?;

        let Value::Object(root) = root else {
            return Err(RepositoryError::configuration_with_context(
                "Snapshot root must be an object of collections",
                context(),
            ));
        };

        let mut collections = HashMap::new();
        for (name, docs) in root {
            let Value::Array(docs) = docs else {
                return Err(RepositoryError::configuration_with_context(
                    format!("Collection '{}' must be an array", name),
                    context().with_entity(name),
                ));
            };

            let mut parsed = Vec::with_capacity(docs.len());
            for (index, doc) in docs.into_iter().enumerate() {
                match doc {
                    Value::Object(map) => parsed.push(map),
                    _ => {
                        return Err(RepositoryError::configuration_with_context(
                            format!("Document {} in '{}' is not an object", index, name),
                            context().with_entity(name),
                        ))
                    }
                }
            }
            debug!(collection = %name, documents = parsed.len(), "Loaded collection");
            collections.insert(name, parsed);
        }

        Ok(Self::from_data(LocalData {
            collections,
            checksum: Some(calculate_checksum(content)),
        }))
    }

    /// Read and parse a snapshot file.
    pub fn from_snapshot_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to read snapshot file: {}", e),
                ErrorContext::new("load_snapshot").with_details(path.display().to_string()),
            )
        })?;
        Self::from_snapshot_str(&content)
    }

    /// Set the health status for testing store failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, AtomicOrdering::SeqCst);
    }

    /// Number of documents in `collection`, zero if it does not exist.
    pub fn document_count(&self, collection: &str) -> usize {
        self.data
            .collections
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.healthy.load(AtomicOrdering::SeqCst) {
            return Err(RepositoryError::connection("History store is not available"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.healthy.load(AtomicOrdering::SeqCst))
    }

    async fn find(&self, query: &DocumentQuery) -> RepositoryResult<Vec<Document>> {
        self.check_health()?;

        let Some(docs) = self.data.collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|doc| {
                doc.get(&query.filter_field).and_then(Value::as_str)
                    == Some(query.filter_value.as_str())
            })
            .cloned()
            .collect())
    }

    async fn collection_sizes(&self) -> RepositoryResult<BTreeMap<String, usize>> {
        self.check_health()?;
        Ok(self
            .data
            .collections
            .iter()
            .map(|(name, docs)| (name.clone(), docs.len()))
            .collect())
    }

    fn snapshot_checksum(&self) -> Option<String> {
        self.data.checksum.clone()
    }
}
