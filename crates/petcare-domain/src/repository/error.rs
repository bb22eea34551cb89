//! Repository errors and their retry classification
//!
//! Every failure is either `Transient` (the same call may succeed if tried
//! again) or `Permanent` (retrying cannot change the outcome). Retry logic
//! in the adapter layer only ever looks at this classification.

/// Whether a failure is worth retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// Network blip, store briefly unavailable
    Transient,
    /// Missing record, rejected request, undecodable data
    Permanent,
}

/// Errors that know their own failure class
pub trait Classify {
    fn failure_class(&self) -> FailureClass;

    fn is_transient(&self) -> bool {
        self.failure_class() == FailureClass::Transient
    }
}

/// Errors surfaced by a `PetProfileRepository`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No profile with this identifier
    NotFound { id: String },
    /// Transport, connectivity or quota failure
    Unavailable { message: String },
    /// The store refused the request
    Rejected { message: String },
    /// A stored document could not be read as a PetProfile
    Corrupt { id: String, message: String },
}

impl Classify for RepositoryError {
    fn failure_class(&self) -> FailureClass {
        match self {
            RepositoryError::Unavailable { .. } => FailureClass::Transient,
            RepositoryError::NotFound { .. }
            | RepositoryError::Rejected { .. }
            | RepositoryError::Corrupt { .. } => FailureClass::Permanent,
        }
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { id } => {
                write!(f, "Pet profile not found: {}", id)
            }
            RepositoryError::Unavailable { message } => {
                write!(f, "Store unavailable: {}", message)
            }
            RepositoryError::Rejected { message } => {
                write!(f, "Store rejected the request: {}", message)
            }
            RepositoryError::Corrupt { id, message } => {
                write!(f, "Pet profile {} is unreadable: {}", id, message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}
