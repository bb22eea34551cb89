//! DocumentCollection - one named collection of a shared store
//!
//! Performs exactly one store round trip per call. Retrying is the caller's
//! job (see `RetryExecutor`).

use std::sync::Arc;

use tracing::debug;

use super::{Document, DocumentStore, StoreError, StoredDocument};

/// Adapter over a single collection of an injected `DocumentStore`
#[derive(Clone)]
pub struct DocumentCollection {
    store: Arc<dyn DocumentStore>,
    name: String,
}

impl DocumentCollection {
    pub fn new(store: Arc<dyn DocumentStore>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Persist a full document; the store assigns and returns the id
    pub async fn create(&self, document: Document) -> Result<String, StoreError> {
        debug!(collection = %self.name, fields = document.len(), "store create");
        self.store.insert(&self.name, document).await
    }

    /// Every document, each with its id; order is store-defined
    pub async fn read_all(&self) -> Result<Vec<StoredDocument>, StoreError> {
        debug!(collection = %self.name, "store read all");
        self.store.list(&self.name).await
    }

    pub async fn read_one(&self, id: &str) -> Result<Document, StoreError> {
        debug!(collection = %self.name, id, "store read one");
        self.store.get(&self.name, id).await
    }

    /// Merge top-level fields into an existing document
    pub async fn update(&self, id: &str, fields: Document) -> Result<(), StoreError> {
        debug!(collection = %self.name, id, fields = fields.len(), "store update");
        self.store.merge(&self.name, id, fields).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        debug!(collection = %self.name, id, "store delete");
        self.store.remove(&self.name, id).await
    }
}

impl core::fmt::Debug for DocumentCollection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DocumentCollection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
