//! Task service.

use std::sync::Arc;

use taskboard_core::cache::{tasks_key, KeyedCache};
use taskboard_core::model::Task;
use taskboard_core::storage::{EntityStore, FindOptions, RelationSet};

use super::{CachedRepository, Result};

/// Service for [`Task`] records.
pub struct TaskService<S, C> {
    repo: CachedRepository<Task, S, C>,
}

impl<S, C> TaskService<S, C>
where
    S: EntityStore<Task> + 'static,
    C: KeyedCache,
{
    /// Relation paths hydrated on every full task read.
    fn default_relations() -> RelationSet {
        RelationSet::new(["assignee", "priority"])
    }

    pub fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        Self {
            repo: CachedRepository::new(store, cache, tasks_key(), Self::default_relations()),
        }
    }

    /// Reads all tasks, optionally from the shared cache.
    pub async fn read_all(&self, options: FindOptions, cached: bool) -> Result<Vec<Task>> {
        self.repo.read_all(options, cached).await
    }

    /// Reads a single task; `None` when nothing matches.
    pub async fn read(&self, options: FindOptions) -> Result<Option<Task>> {
        self.repo.read(options).await
    }

    /// Saves a new or updated task and clears the task list cache.
    pub async fn save(&self, task: Task) -> Result<Task> {
        self.repo.save(task).await
    }

    /// Deletes a task and clears the task list cache.
    pub async fn delete(&self, task: Task) -> Result<Task> {
        self.repo.delete(task).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use taskboard_core::model::{TaskPriority, User};

    use crate::cache::MemoryCache;
    use crate::services::testing::SpyStore;

    #[tokio::test]
    async fn test_read_all_hydrates_default_relations() {
        let store = Arc::new(SpyStore::new());
        let service = TaskService::new(Arc::clone(&store), Arc::new(MemoryCache::new()));

        let alan = store
            .inner
            .persist(User::new("alan@example.com", "Alan", "Turing"))
            .await
            .unwrap();
        let high = store
            .inner
            .persist(TaskPriority::new("High", 30))
            .await
            .unwrap();
        service
            .save(
                Task::new("Break the code")
                    .with_assignee(alan.id)
                    .with_priority(high.id),
            )
            .await
            .unwrap();

        let tasks = service.read_all(FindOptions::default(), true).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].assignee.as_ref().unwrap().id, alan.id);
        assert_eq!(tasks[0].priority.as_ref().unwrap().value, 30);
    }

    #[tokio::test]
    async fn test_caller_relations_merge_under_the_defaults() {
        let store = Arc::new(SpyStore::new());
        let service = TaskService::new(Arc::clone(&store), Arc::new(MemoryCache::new()));

        let alan = store
            .inner
            .persist(User::new("alan@example.com", "Alan", "Turing"))
            .await
            .unwrap();
        service
            .save(Task::new("Break the code").with_assignee(alan.id))
            .await
            .unwrap();

        // A caller naming only one relation still gets the full default set.
        let options = FindOptions::default().with_relations(RelationSet::new(["priority"]));
        let tasks = service.read_all(options, true).await.unwrap();

        assert_eq!(tasks[0].assignee.as_ref().unwrap().id, alan.id);
    }
}
