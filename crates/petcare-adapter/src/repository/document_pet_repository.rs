//! Document-store backed PetProfile repository
//!
//! Every store round trip runs under the injected `RetryExecutor`. Errors
//! are logged and returned; the mapping into `RepositoryError` keeps the
//! store's transient/permanent classification.

use petcare_domain::{
    PetId, PetProfile, PetProfilePatch, PetProfileRepository, RepositoryError,
};
use tracing::{error, info};

use crate::document::{document_to_profile, patch_to_document, profile_to_document};
use crate::retry::RetryExecutor;
use crate::store::collection::DocumentCollection;
use crate::store::StoreError;

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => RepositoryError::NotFound { id },
            StoreError::Malformed { id, source, .. } => RepositoryError::Corrupt {
                id,
                message: source.to_string(),
            },
            StoreError::Rejected { .. } => RepositoryError::Rejected {
                message: err.to_string(),
            },
            StoreError::Encoding(_) => RepositoryError::Rejected {
                message: err.to_string(),
            },
            StoreError::Unavailable(_) | StoreError::Io(_) => RepositoryError::Unavailable {
                message: err.to_string(),
            },
        }
    }
}

/// PetProfile repository over a document collection
#[derive(Debug, Clone)]
pub struct DocumentPetProfileRepository {
    collection: DocumentCollection,
    retry: RetryExecutor,
}

impl DocumentPetProfileRepository {
    pub fn new(collection: DocumentCollection, retry: RetryExecutor) -> Self {
        Self { collection, retry }
    }

    pub fn collection(&self) -> &DocumentCollection {
        &self.collection
    }

    async fn fetch(&self, id: &PetId) -> Result<PetProfile, StoreError> {
        let collection = &self.collection;
        let document = self
            .retry
            .run("get_pet_profile_by_id", move || collection.read_one(id.as_str()))
            .await?;
        document_to_profile(collection.name(), id.as_str(), document)
    }
}

impl PetProfileRepository for DocumentPetProfileRepository {
    async fn create_pet_profile(&self, profile: &PetProfile) -> Result<PetId, RepositoryError> {
        info!(name = %profile.name, breed = %profile.breed, "creating pet profile");
        let collection = &self.collection;
        let result = match profile_to_document(profile) {
            Ok(document) => {
                self.retry
                    .run("create_pet_profile", move || collection.create(document.clone()))
                    .await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(id) => {
                info!(id = %id, name = %profile.name, "created pet profile");
                Ok(PetId::new(id))
            }
            Err(e) => {
                error!(name = %profile.name, error = %e, "create pet profile failed");
                Err(e.into())
            }
        }
    }

    async fn get_all_pet_profiles(&self) -> Result<Vec<PetProfile>, RepositoryError> {
        let collection = &self.collection;
        let result = self
            .retry
            .run("get_all_pet_profiles", move || collection.read_all())
            .await
            .and_then(|documents| {
                documents
                    .into_iter()
                    .map(|doc| document_to_profile(collection.name(), &doc.id, doc.data))
                    .collect::<Result<Vec<_>, _>>()
            });
        match result {
            Ok(profiles) => {
                let summary: Vec<String> = profiles
                    .iter()
                    .map(|p| {
                        format!(
                            "{}:{}",
                            p.id.as_ref().map(PetId::as_str).unwrap_or_default(),
                            p.name
                        )
                    })
                    .collect();
                info!(count = profiles.len(), profiles = ?summary, "fetched pet profiles");
                Ok(profiles)
            }
            Err(e) => {
                error!(error = %e, "get all pet profiles failed");
                Err(e.into())
            }
        }
    }

    async fn get_pet_profile_by_id(&self, id: &PetId) -> Result<PetProfile, RepositoryError> {
        info!(id = %id, "fetching pet profile");
        match self.fetch(id).await {
            Ok(profile) => {
                info!(id = %id, name = %profile.name, "fetched pet profile");
                Ok(profile)
            }
            Err(e) => {
                error!(id = %id, error = %e, "get pet profile failed");
                Err(e.into())
            }
        }
    }

    async fn update_pet_profile(
        &self,
        id: &PetId,
        patch: &PetProfilePatch,
    ) -> Result<PetProfile, RepositoryError> {
        info!(id = %id, fields = ?patch.changed_fields(), "updating pet profile");
        let collection = &self.collection;
        let written = match patch_to_document(patch) {
            Ok(fields) => {
                self.retry
                    .run("update_pet_profile", move || {
                        collection.update(id.as_str(), fields.clone())
                    })
                    .await
            }
            Err(e) => Err(e),
        };
        // Re-read so callers get the merged entity rather than rebuilding it
        let result = match written {
            Ok(()) => self.fetch(id).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(profile) => {
                info!(id = %id, name = %profile.name, "updated pet profile");
                Ok(profile)
            }
            Err(e) => {
                error!(id = %id, error = %e, "update pet profile failed");
                Err(e.into())
            }
        }
    }

    async fn delete_pet_profile(&self, id: &PetId) -> Result<(), RepositoryError> {
        info!(id = %id, "deleting pet profile");
        let collection = &self.collection;
        match self
            .retry
            .run("delete_pet_profile", move || collection.delete(id.as_str()))
            .await
        {
            Ok(()) => {
                info!(id = %id, "deleted pet profile");
                Ok(())
            }
            Err(e) => {
                error!(id = %id, error = %e, "delete pet profile failed");
                Err(e.into())
            }
        }
    }
}
