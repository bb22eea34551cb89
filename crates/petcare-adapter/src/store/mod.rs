//! Document Store - schemaless JSON records keyed by generated identifiers
//!
//! `DocumentStore` is the backend contract (one instance per process, shared
//! through `Arc`). `DocumentCollection` narrows it to a single named
//! collection and is what repositories talk to.
//!
//! ```text
//! DocumentPetProfileRepository
//!   └── DocumentCollection ("petProfiles")
//!         └── Arc<dyn DocumentStore>  (memory | json file)
//! ```

pub mod collection;
pub mod file;
pub mod memory;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use async_trait::async_trait;
use petcare_domain::{Classify, FailureClass};
use shared::StoreConfig;
use thiserror::Error;

/// A stored document body; the identifier is kept out of band
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A document together with its storage key
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

/// Errors raised by document store backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Document '{id}' not found in collection '{collection}'")]
    NotFound { collection: String, id: String },

    #[error("Store rejected {operation} on '{collection}/{id}': {reason}")]
    Rejected {
        operation: &'static str,
        collection: String,
        id: String,
        reason: String,
    },

    #[error("Document '{collection}/{id}' is malformed: {source}")]
    Malformed {
        collection: String,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl Classify for StoreError {
    fn failure_class(&self) -> FailureClass {
        match self {
            StoreError::Unavailable(_) | StoreError::Io(_) => FailureClass::Transient,
            StoreError::NotFound { .. }
            | StoreError::Rejected { .. }
            | StoreError::Malformed { .. }
            | StoreError::Encoding(_) => FailureClass::Permanent,
        }
    }
}

/// Backend contract for a remote (or local) document database
///
/// `merge` writes top-level fields only: a nested object in `fields`
/// replaces the stored one, it is not deep-merged.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document and return its generated identifier
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Every document in the collection, in store-defined order
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    /// One document; `StoreError::NotFound` if absent
    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError>;

    /// Overwrite the given top-level fields; `StoreError::NotFound` if absent
    async fn merge(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError>;

    /// Delete a document; deleting a missing id is `StoreError::Rejected`
    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Fresh document identifier
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Top-level field merge shared by every backend
pub(crate) fn merge_fields(target: &mut Document, fields: Document) {
    for (key, value) in fields {
        target.insert(key, value);
    }
}

/// Open the process-wide store described by `config`
pub fn open(config: &StoreConfig) -> Arc<dyn DocumentStore> {
    match config {
        StoreConfig::Memory => Arc::new(memory::InMemoryDocumentStore::new()),
        StoreConfig::File { path } => Arc::new(file::JsonFileDocumentStore::new(path)),
    }
}
