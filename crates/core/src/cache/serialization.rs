//! Pure functions for serializing record lists to/from cache bytes.
//!
//! Cache values are JSON so they stay human-readable when debugging. The
//! helpers are generic over the record type; one pair serves every entity
//! service.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CacheError, Result};

/// Serializes a slice of records to JSON bytes.
pub fn serialize_records<E: Serialize>(records: &[E]) -> Result<Vec<u8>> {
    serde_json::to_vec(records).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes JSON bytes back into a vector of records.
pub fn deserialize_records<E: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<E>> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskPriority, User};
    use uuid::Uuid;

    fn test_user_id() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()
    }

    #[test]
    fn test_roundtrip_users() {
        let users = vec![
            User::new("ada@example.com", "Ada", "Lovelace").with_id(test_user_id()),
            User::new("alan@example.com", "Alan", "Turing"),
        ];

        let bytes = serialize_records(&users).expect("serialize should succeed");
        let deserialized: Vec<User> = deserialize_records(&bytes).expect("deserialize should succeed");

        assert_eq!(users, deserialized);
    }

    #[test]
    fn test_roundtrip_priorities() {
        let priorities = vec![
            TaskPriority::new("Low", 10),
            TaskPriority::new("High", 30),
        ];

        let bytes = serialize_records(&priorities).expect("serialize should succeed");
        let deserialized: Vec<TaskPriority> =
            deserialize_records(&bytes).expect("deserialize should succeed");

        assert_eq!(priorities, deserialized);
    }

    #[test]
    fn test_empty_list_serializes_to_empty_array() {
        let users: Vec<User> = vec![];

        let bytes = serialize_records(&users).expect("serialize should succeed");
        assert_eq!(bytes, b"[]");

        let deserialized: Vec<User> = deserialize_records(&bytes).expect("deserialize should succeed");
        assert!(deserialized.is_empty());
    }

    #[test]
    fn test_deserialize_malformed_bytes() {
        let malformed = b"not valid json";
        let result: Result<Vec<User>> = deserialize_records(malformed);

        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }
}
