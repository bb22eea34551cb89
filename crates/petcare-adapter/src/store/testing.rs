//! Fault injection for store tests

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::memory::InMemoryDocumentStore;
use super::{Document, DocumentStore, StoreError, StoredDocument};

/// Wraps an in-memory store and fails the first `failures` calls with a
/// transient `StoreError::Unavailable`
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    inner: InMemoryDocumentStore,
    failures: AtomicUsize,
    calls: AtomicUsize,
}

impl FlakyStore {
    pub(crate) fn new(inner: InMemoryDocumentStore) -> Self {
        Self {
            inner,
            failures: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail the next `n` calls
    pub(crate) fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn trip(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(StoreError::Unavailable("injected outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        self.trip()?;
        self.inner.insert(collection, document).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        self.trip()?;
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        self.trip()?;
        self.inner.get(collection, id).await
    }

    async fn merge(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        self.trip()?;
        self.inner.merge(collection, id, fields).await
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.trip()?;
        self.inner.remove(collection, id).await
    }
}
