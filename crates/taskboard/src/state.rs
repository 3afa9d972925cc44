//! Application state with service-based data access.
//!
//! This module wires the service graph consumed by the HTTP layer: one
//! service per entity, all sharing a single store accessor and a single
//! process-wide keyed cache. Construction is the only place services learn
//! about their collaborators; there is no global registry.

use std::sync::Arc;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::mock_data;
use crate::services::{
    ProjectService, Result, TaskPriorityService, TaskService, UserRoleService, UserService,
};
use crate::storage::InMemoryStore;

/// Shared application state.
///
/// Cloning is cheap; all services are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService<InMemoryStore, MemoryCache>>,
    pub user_roles: Arc<UserRoleService<InMemoryStore, MemoryCache>>,
    pub tasks: Arc<TaskService<InMemoryStore, MemoryCache>>,
    pub task_priorities: Arc<TaskPriorityService<InMemoryStore, MemoryCache>>,
    pub projects: Arc<ProjectService<InMemoryStore, MemoryCache>>,
}

impl AppState {
    /// Creates the service graph over a fresh store and cache.
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let cache = Arc::new(MemoryCache::new());

        let tasks = Arc::new(TaskService::new(Arc::clone(&store), Arc::clone(&cache)));
        let users = Arc::new(UserService::new(
            Arc::clone(&store),
            Arc::clone(&cache),
            Arc::clone(&tasks),
        ));
        let user_roles = Arc::new(UserRoleService::new(
            Arc::clone(&store),
            Arc::clone(&cache),
        ));
        let task_priorities = Arc::new(TaskPriorityService::new(
            Arc::clone(&store),
            Arc::clone(&cache),
        ));
        let projects = Arc::new(ProjectService::new(store, cache));

        Self {
            users,
            user_roles,
            tasks,
            task_priorities,
            projects,
        }
    }

    /// Creates state pre-populated with demo records.
    pub async fn with_demo_data() -> Result<Self> {
        let state = Self::new();
        mock_data::seed(&state).await?;
        Ok(state)
    }

    /// Creates state per the given configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        if config.seed_demo_data {
            Self::with_demo_data().await
        } else {
            Ok(Self::new())
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
