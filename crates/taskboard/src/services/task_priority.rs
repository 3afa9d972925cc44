//! Task-priority service.

use std::sync::Arc;

use taskboard_core::cache::{task_priorities_key, KeyedCache};
use taskboard_core::model::TaskPriority;
use taskboard_core::storage::{EntityStore, FindOptions, RelationSet};

use super::{CachedRepository, Result};

/// Service for [`TaskPriority`] records.
///
/// Priorities are a leaf entity: no relations to hydrate, so the default
/// relation set is empty.
pub struct TaskPriorityService<S, C> {
    repo: CachedRepository<TaskPriority, S, C>,
}

impl<S, C> TaskPriorityService<S, C>
where
    S: EntityStore<TaskPriority> + 'static,
    C: KeyedCache,
{
    pub fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        Self {
            repo: CachedRepository::new(
                store,
                cache,
                task_priorities_key(),
                RelationSet::default(),
            ),
        }
    }

    /// Reads all priorities, optionally from the shared cache.
    pub async fn read_all(&self, options: FindOptions, cached: bool) -> Result<Vec<TaskPriority>> {
        self.repo.read_all(options, cached).await
    }

    /// Reads a single priority; `None` when nothing matches.
    pub async fn read(&self, options: FindOptions) -> Result<Option<TaskPriority>> {
        self.repo.read(options).await
    }

    /// Saves a new or updated priority and clears the priority list cache.
    pub async fn save(&self, priority: TaskPriority) -> Result<TaskPriority> {
        self.repo.save(priority).await
    }

    /// Deletes a priority and clears the priority list cache.
    pub async fn delete(&self, priority: TaskPriority) -> Result<TaskPriority> {
        self.repo.delete(priority).await
    }
}
