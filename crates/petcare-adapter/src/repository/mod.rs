//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from petcare-domain.

pub mod document_pet_repository;
