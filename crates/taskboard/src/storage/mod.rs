//! Storage backend implementations.
//!
//! Concrete implementations of the store-accessor contract in
//! `taskboard_core::storage`.

pub mod inmemory;

pub use inmemory::InMemoryStore;
