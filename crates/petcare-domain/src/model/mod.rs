//! Domain Models - The vocabulary of pet record keeping
//!
//! `PetProfile` is the aggregate root. Everything else here is a nested
//! record stored and retrieved together with it.

pub mod age;
pub mod health;
pub mod pet_profile;
pub mod reminder;
pub mod training;
pub mod vet_visit;
