use async_trait::async_trait;

use crate::model::Entity;

use super::{Query, Result};

/// Store accessor for one entity type.
///
/// Implementations hydrate relations per the query's relation set; hydration
/// is atomic and consistent as of query time.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Runs a query, returning hydrated entities.
    ///
    /// Results follow the store's natural order unless the query orders
    /// otherwise.
    async fn find(&self, query: &Query) -> Result<Vec<E>>;

    /// Returns at most one matching entity, or `None` when nothing matches.
    async fn find_one(&self, query: &Query) -> Result<Option<E>>;

    /// Inserts or updates by identity, returning the persisted entity with
    /// store-assigned fields filled in.
    async fn persist(&self, entity: E) -> Result<E>;

    /// Removes the row by identity, returning the entity as it existed
    /// before deletion.
    async fn remove(&self, entity: E) -> Result<E>;
}
