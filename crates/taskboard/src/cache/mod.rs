//! Cache backend implementations.
//!
//! Concrete implementations of the keyed-cache contract in
//! `taskboard_core::cache`.

pub mod memory;

pub use memory::MemoryCache;
