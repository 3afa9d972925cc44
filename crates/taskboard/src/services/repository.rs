//! Generic cache-aside repository.
//!
//! One instantiation exists per entity type, binding the entity's default
//! relation set and list cache key to a store accessor and the process-wide
//! keyed cache.

use std::marker::PhantomData;
use std::sync::Arc;

use taskboard_core::cache::{deserialize_records, serialize_records, KeyedCache, Populate};
use taskboard_core::model::Entity;
use taskboard_core::storage::{EntityStore, FindOptions, Query, RelationSet};

use super::Result;

/// Cache-aside repository for one entity type.
///
/// Reads without options may be served from the single list entry the entity
/// owns in the cache; reads with options always query the store with the
/// caller's options resolved on top of the default relation set. Writes go to
/// the store and invalidate the list key before returning, so no write is
/// observable while a stale entry still exists.
pub struct CachedRepository<E, S, C> {
    store: Arc<S>,
    cache: Arc<C>,
    cache_key: &'static str,
    default_relations: RelationSet,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S, C> CachedRepository<E, S, C>
where
    E: Entity,
    S: EntityStore<E> + 'static,
    C: KeyedCache,
{
    pub fn new(
        store: Arc<S>,
        cache: Arc<C>,
        cache_key: &'static str,
        default_relations: RelationSet,
    ) -> Self {
        Self {
            store,
            cache,
            cache_key,
            default_relations,
            _entity: PhantomData,
        }
    }

    fn resolve(&self, options: FindOptions) -> Query {
        Query::resolve(&self.default_relations, options)
    }

    /// Reads all entities.
    ///
    /// Present options force a direct store query; otherwise `cached` decides
    /// whether the shared list entry may serve the read.
    pub async fn read_all(&self, options: FindOptions, cached: bool) -> Result<Vec<E>> {
        if !options.is_empty() {
            return Ok(self.store.find(&self.resolve(options)).await?);
        }

        if cached {
            let store = Arc::clone(&self.store);
            let query = self.resolve(FindOptions::default());
            let populate: Populate = Box::pin(async move {
                let records = store.find(&query).await?;
                serialize_records(&records)
            });

            let bytes = self.cache.get_with(self.cache_key, populate).await?;
            return Ok(deserialize_records(&bytes)?);
        }

        Ok(self.store.find(&self.resolve(FindOptions::default())).await?)
    }

    /// Reads at most one entity matching `options`; `None` when nothing
    /// matches.
    pub async fn read(&self, options: FindOptions) -> Result<Option<E>> {
        Ok(self.store.find_one(&self.resolve(options)).await?)
    }

    /// Reads at most one entity with an exact relation set, skipping the
    /// default-relation merge.
    ///
    /// Context-sensitive reads use this to select their own hydration shape;
    /// under the merge their selection would always widen to the defaults.
    pub async fn read_with_relations(
        &self,
        relations: RelationSet,
        options: FindOptions,
    ) -> Result<Option<E>> {
        let query = Query::with_relations(relations, options);
        Ok(self.store.find_one(&query).await?)
    }

    /// Inserts or updates the entity, then invalidates the list cache entry.
    pub async fn save(&self, entity: E) -> Result<E> {
        let persisted = self.store.persist(entity).await?;
        self.cache.delete(self.cache_key).await;
        tracing::debug!(entity = E::KIND, id = %persisted.id(), "Saved, cache invalidated");
        Ok(persisted)
    }

    /// Deletes the entity, then invalidates the list cache entry.
    pub async fn delete(&self, entity: E) -> Result<E> {
        let removed = self.store.remove(entity).await?;
        self.cache.delete(self.cache_key).await;
        tracing::debug!(entity = E::KIND, id = %removed.id(), "Deleted, cache invalidated");
        Ok(removed)
    }
}
