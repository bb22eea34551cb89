//! JSON File Document Store
//!
//! Keeps every collection in one JSON file:
//!
//! ```json
//! { "petProfiles": { "<id>": { "name": "Browny", ... } } }
//! ```
//!
//! Each write rewrites the whole file through a sibling temp file followed
//! by a rename. A missing file is an empty store.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{generate_id, merge_fields, Document, DocumentStore, StoreError, StoredDocument};

type Collections = HashMap<String, BTreeMap<String, Document>>;

/// File-backed Document Store
#[derive(Debug)]
pub struct JsonFileDocumentStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Collections, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Collections::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Collections::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn save(&self, collections: &Collections) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(collections)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileDocumentStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut collections = self.load().await?;
        let id = generate_id();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document);
        self.save(&collections).await?;
        Ok(id)
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let mut collections = self.load().await?;
        Ok(collections
            .remove(collection)
            .map(|docs| {
                docs.into_iter()
                    .map(|(id, data)| StoredDocument { id, data })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        let mut collections = self.load().await?;
        collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn merge(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut collections = self.load().await?;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        merge_fields(document, fields);
        self.save(&collections).await
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut collections = self.load().await?;
        if collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_none()
        {
            return Err(StoreError::Rejected {
                operation: "delete",
                collection: collection.to_string(),
                id: id.to_string(),
                reason: "no such document".to_string(),
            });
        }
        self.save(&collections).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileDocumentStore::new(dir.path().join("pets.json"));

        assert!(store.list("petProfiles").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pets.json");

        let id = JsonFileDocumentStore::new(&path)
            .insert("petProfiles", doc(json!({ "name": "Browny", "breed": "Labrador" })))
            .await
            .unwrap();

        let reopened = JsonFileDocumentStore::new(&path);
        reopened
            .merge("petProfiles", &id, doc(json!({ "name": "Rex" })))
            .await
            .unwrap();

        let found = JsonFileDocumentStore::new(&path)
            .get("petProfiles", &id)
            .await
            .unwrap();
        assert_eq!(found["name"], "Rex");
        assert_eq!(found["breed"], "Labrador");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_missing_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileDocumentStore::new(dir.path().join("pets.json"));

        let err = store.remove("petProfiles", "nope").await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileDocumentStore::new(&path)
            .list("petProfiles")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Encoding(_)));
    }
}
