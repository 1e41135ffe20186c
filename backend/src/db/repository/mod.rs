//! Repository trait for the historical record store.
//!
//! The store is document-shaped: named collections of loosely-typed JSON
//! objects. It knows nothing about series, aliases or measurement names; the
//! per-series interpretation lives in [`crate::db::schema`] and
//! [`crate::db::services`].
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use std::collections::BTreeMap;

/// A stored document: field name to raw JSON value.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Equality filter on one field of one collection.
///
/// Ordering and windowing are not part of the query: stored dates come in
/// several shapes, so only the schema-aware accessor can rank them.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    pub collection: String,
    pub filter_field: String,
    pub filter_value: String,
}

impl DocumentQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filter_field: String::new(),
            filter_value: String::new(),
        }
    }

    /// Keep documents whose `field` equals `value` exactly.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter_field = field.into();
        self.filter_value = value.into();
        self
    }
}

/// Read-only access to the historical record store.
///
/// Implementations must be shareable across request handlers without
/// locking; the store is never written after startup.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Whether the store can currently serve queries.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Every document matching `query`, in stored order.
    ///
    /// An empty result (including an unknown collection) is `Ok(vec![])`;
    /// interpreting emptiness is the caller's job.
    async fn find(&self, query: &DocumentQuery) -> RepositoryResult<Vec<Document>>;

    /// Document count per collection.
    async fn collection_sizes(&self) -> RepositoryResult<BTreeMap<String, usize>>;

    /// Checksum of the data the store was loaded from, if any.
    fn snapshot_checksum(&self) -> Option<String> {
        None
    }
}
