//! User-role service.

use std::sync::Arc;

use taskboard_core::cache::{user_roles_key, KeyedCache};
use taskboard_core::model::UserRole;
use taskboard_core::storage::{EntityStore, FindOptions, RelationSet};

use super::{CachedRepository, Result};

/// Service for [`UserRole`] records.
///
/// Roles are a leaf entity: no relations to hydrate, so the default relation
/// set is empty.
pub struct UserRoleService<S, C> {
    repo: CachedRepository<UserRole, S, C>,
}

impl<S, C> UserRoleService<S, C>
where
    S: EntityStore<UserRole> + 'static,
    C: KeyedCache,
{
    pub fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        Self {
            repo: CachedRepository::new(store, cache, user_roles_key(), RelationSet::default()),
        }
    }

    /// Reads all roles, optionally from the shared cache.
    pub async fn read_all(&self, options: FindOptions, cached: bool) -> Result<Vec<UserRole>> {
        self.repo.read_all(options, cached).await
    }

    /// Reads a single role; `None` when nothing matches.
    pub async fn read(&self, options: FindOptions) -> Result<Option<UserRole>> {
        self.repo.read(options).await
    }

    /// Saves a new or updated role and clears the role list cache.
    pub async fn save(&self, role: UserRole) -> Result<UserRole> {
        self.repo.save(role).await
    }

    /// Deletes a role and clears the role list cache.
    pub async fn delete(&self, role: UserRole) -> Result<UserRole> {
        self.repo.delete(role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cache::MemoryCache;
    use crate::services::testing::SpyStore;

    #[tokio::test]
    async fn test_save_then_cached_read_sees_the_role() {
        let store = Arc::new(SpyStore::new());
        let service = UserRoleService::new(Arc::clone(&store), Arc::new(MemoryCache::new()));

        service.save(UserRole::new("Admin")).await.unwrap();
        let roles = service.read_all(FindOptions::default(), true).await.unwrap();

        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "Admin");
        assert_eq!(store.finds(), 1);
    }
}
