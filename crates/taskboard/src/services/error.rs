use thiserror::Error;

use taskboard_core::cache::CacheError;
use taskboard_core::storage::PersistenceError;

/// Errors surfaced by entity-service operations.
///
/// Absence of a single entity is `Ok(None)` on the read paths, never an
/// error; the boundary layer maps these kinds to response codes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] PersistenceError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Result type for entity-service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
