//! Cache-aside data-access layer for the taskboard backend.
//!
//! The entity services in [`services`] wrap the store accessor with a
//! process-wide keyed cache: unfiltered reads may be served from the cache,
//! filtered reads always hit the store, and writes invalidate the owning
//! entity's cache entry before returning. [`state::AppState`] wires the
//! service graph for consumption by an HTTP layer.

pub mod cache;
pub mod config;
pub mod mock_data;
pub mod services;
pub mod state;
pub mod storage;
