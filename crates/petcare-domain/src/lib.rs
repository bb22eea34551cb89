//! # Petcare Domain Layer
//!
//! The pet-profile aggregate and the ports used to persist it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - PetProfile aggregate & nested records         ││
//! │  │  repository/- Port definitions & error classification       ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This crate has no external dependencies. Wire formats, retries and
//! the remote store all live in `petcare-adapter`.

pub mod model;
pub mod repository;

// Re-export commonly used types
pub use model::{
    age::{AgeError, PetAge},
    health::{HealthInfo, WeightEntry},
    pet_profile::{PetId, PetProfile, PetProfilePatch},
    reminder::{ParseEnumError, Reminder, ReminderKind, RepeatInterval},
    training::TrainingEntry,
    vet_visit::{ClinicInfo, VetVisit},
};

pub use repository::{
    error::{Classify, FailureClass, RepositoryError},
    pet_profile_repository::PetProfileRepository,
};
