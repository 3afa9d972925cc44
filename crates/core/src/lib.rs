//! Core contracts for the taskboard data-access layer.
//!
//! This crate holds the pure, backend-agnostic pieces: the entity types, the
//! store-accessor contract with its query vocabulary, and the keyed-cache
//! contract. Concrete backends live in the `taskboard` crate.

pub mod cache;
pub mod model;
pub mod storage;
