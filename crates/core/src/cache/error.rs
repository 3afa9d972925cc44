use thiserror::Error;

use crate::storage::PersistenceError;

/// Errors that can occur during keyed-cache reads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The population supplier failed; nothing was stored under the key.
    #[error("Cache population failed: {0}")]
    Population(#[from] PersistenceError),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for keyed-cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
