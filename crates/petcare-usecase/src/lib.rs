//! # Petcare Use Case Layer
//!
//! What a screen does around a repository call: validate input, keep
//! nested records tidy, and turn "add a weight" into a read-modify-write of
//! the right top-level field.

pub mod pet_profile_service;
pub mod validation;

pub use pet_profile_service::{PetProfileService, ServiceError, UpcomingReminder};
pub use validation::ValidationError;
