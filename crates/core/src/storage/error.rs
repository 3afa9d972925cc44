use thiserror::Error;

/// Errors that can occur during store-accessor operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for store-accessor operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = PersistenceError::NotFound {
            entity_type: "Task",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Task not found: abc-123");
    }

    #[test]
    fn test_already_exists_display() {
        let error = PersistenceError::AlreadyExists {
            entity_type: "User",
            id: "ada@example.com".to_string(),
        };
        assert_eq!(error.to_string(), "User already exists: ada@example.com");
    }

    #[test]
    fn test_connection_failed_display() {
        let error = PersistenceError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_query_failed_display() {
        let error = PersistenceError::QueryFailed("bad field path".to_string());
        assert_eq!(error.to_string(), "Query failed: bad field path");
    }

    #[test]
    fn test_serialization_display() {
        let error = PersistenceError::Serialization("missing required field".to_string());
        assert_eq!(
            error.to_string(),
            "Serialization error: missing required field"
        );
    }
}
