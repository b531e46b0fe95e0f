//! Key-value store contract consumed by the providers.
//!
//! Entities are keyed by `(id, realm_id)`. `update` is an upsert; lookups of
//! unknown keys return `None` rather than an error.

use async_trait::async_trait;

use crate::error::StorageResult;

/// An entity addressable by `(id, realm_id)`.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Kind name used for error messages and storage layout.
    const KIND: &'static str;

    /// Identifier, unique within the realm.
    fn id(&self) -> &str;

    /// Owning realm.
    fn realm_id(&self) -> &str;
}

/// Persistence for one entity kind.
///
/// Implementations must be thread-safe. No locking spans calls: concurrent
/// writers to the same key are last-write-wins.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Reads one entity.
    async fn read(&self, id: &str, realm_id: &str) -> StorageResult<Option<E>>;

    /// Reads every entity of every realm.
    async fn read_all(&self) -> StorageResult<Vec<E>>;

    /// Inserts or replaces an entity.
    async fn update(&self, entity: &E) -> StorageResult<()>;

    /// Checks whether an entity exists.
    async fn exists(&self, id: &str, realm_id: &str) -> StorageResult<bool> {
        Ok(self.read(id, realm_id).await?.is_some())
    }

    /// Deletes one entity. Deleting a missing entity is not an error.
    async fn delete_by_id(&self, id: &str, realm_id: &str) -> StorageResult<()>;

    /// Deletes every entity of a realm.
    async fn delete_by_realm_id(&self, realm_id: &str) -> StorageResult<()>;

    /// Reads every entity of one realm.
    async fn read_realm(&self, realm_id: &str) -> StorageResult<Vec<E>> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .filter(|e| e.realm_id() == realm_id)
            .collect())
    }
}
