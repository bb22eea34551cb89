//! PetProfile Repository - Abstract persistence for pet profiles
//!
//! This trait defines what callers need from storage. How it is done
//! (remote document store, local file, memory) is the adapter's concern,
//! and so is retrying.
//!
//! Concurrent writers are not coordinated: the last update or delete wins
//! and no conflict is reported.

use core::future::Future;

use crate::model::pet_profile::{PetId, PetProfile, PetProfilePatch};
use crate::repository::error::RepositoryError;

/// PetProfile Repository Trait
///
/// This is a PORT in hexagonal architecture. Methods return
/// `impl Future + Send` so the domain stays free of async runtime crates.
pub trait PetProfileRepository: Send + Sync {
    /// Persist a new profile and return the store-assigned identifier
    ///
    /// Any `id` already set on `profile` is ignored; the store always
    /// assigns a fresh one.
    fn create_pet_profile(
        &self,
        profile: &PetProfile,
    ) -> impl Future<Output = Result<PetId, RepositoryError>> + Send;

    /// Every stored profile, each with `id` populated
    fn get_all_pet_profiles(
        &self,
    ) -> impl Future<Output = Result<Vec<PetProfile>, RepositoryError>> + Send;

    /// One profile; fails with `RepositoryError::NotFound` if absent
    fn get_pet_profile_by_id(
        &self,
        id: &PetId,
    ) -> impl Future<Output = Result<PetProfile, RepositoryError>> + Send;

    /// Merge `patch` into the stored profile and return the merged result
    fn update_pet_profile(
        &self,
        id: &PetId,
        patch: &PetProfilePatch,
    ) -> impl Future<Output = Result<PetProfile, RepositoryError>> + Send;

    /// Remove the profile
    fn delete_pet_profile(
        &self,
        id: &PetId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
