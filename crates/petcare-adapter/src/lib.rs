//! # Petcare Adapter Layer
//!
//! Outbound adapters (Hexagonal Architecture).
//!
//! ## Structure
//!
//! - `store/` - Document store backends and the per-collection adapter
//! - `retry` - Bounded fixed-delay retry for store round trips
//! - `document` - Wire shapes of stored pet profile documents
//! - `repository/` - `PetProfileRepository` implementation

pub mod document;
pub mod repository;
pub mod retry;
pub mod store;

pub use repository::document_pet_repository::DocumentPetProfileRepository;
pub use retry::{RetryExecutor, RetryPolicy};
pub use store::{
    collection::DocumentCollection, file::JsonFileDocumentStore, memory::InMemoryDocumentStore,
    Document, DocumentStore, StoreError, StoredDocument,
};
