//! Project service.

use std::sync::Arc;

use serde_json::json;

use taskboard_core::cache::{projects_key, KeyedCache};
use taskboard_core::model::{Project, User};
use taskboard_core::storage::{EntityStore, Filter, FindOptions, RelationSet};

use super::{CachedRepository, Result};

/// Service for [`Project`] records.
pub struct ProjectService<S, C> {
    repo: CachedRepository<Project, S, C>,
}

impl<S, C> ProjectService<S, C>
where
    S: EntityStore<Project> + 'static,
    C: KeyedCache,
{
    /// Relation paths hydrated on every full project read.
    fn default_relations() -> RelationSet {
        RelationSet::new(["author", "tasks"])
    }

    pub fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        Self {
            repo: CachedRepository::new(store, cache, projects_key(), Self::default_relations()),
        }
    }

    /// Reads all projects, optionally from the shared cache.
    pub async fn read_all(&self, options: FindOptions, cached: bool) -> Result<Vec<Project>> {
        self.repo.read_all(options, cached).await
    }

    /// Reads a single project; `None` when nothing matches.
    pub async fn read(&self, options: FindOptions) -> Result<Option<Project>> {
        self.repo.read(options).await
    }

    /// Saves a new or updated project and clears the project list cache.
    pub async fn save(&self, project: Project) -> Result<Project> {
        self.repo.save(project).await
    }

    /// Deletes a project and clears the project list cache.
    pub async fn delete(&self, project: Project) -> Result<Project> {
        self.repo.delete(project).await
    }

    /// Reads the projects authored by the given user.
    pub async fn read_projects_by_author(&self, author: &User) -> Result<Vec<Project>> {
        let options = FindOptions::default()
            .with_filter(Filter::new().eq("author_id", json!(author.id)));

        self.read_all(options, false).await
    }
}
