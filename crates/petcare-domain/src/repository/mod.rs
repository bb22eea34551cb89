//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! ```text
//! Domain Layer                 │  Adapter Layer
//! ─────────────────────────────┼──────────────────────────────
//! trait PetProfileRepository   │  DocumentPetProfileRepository
//!   fn create_pet_profile()    │    (retry + document store)
//!   fn get_pet_profile_by_id() │
//! ```

pub mod error;
pub mod pet_profile_repository;
