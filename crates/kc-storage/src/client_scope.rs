//! Client scope storage provider trait.

use std::collections::HashMap;

use async_trait::async_trait;
use kc_model::ClientScope;

use crate::error::StorageResult;

/// Provider for client scope storage operations.
///
/// Scope IDs and names are unique per realm. Lookups and removals of unknown
/// IDs report absence (`None` / `false`) rather than errors.
#[async_trait]
pub trait ClientScopeProvider: Send + Sync {
    /// Lists all scopes of a realm, sorted by name.
    async fn list(&self, realm_id: &str) -> StorageResult<Vec<ClientScope>>;

    /// Adds a new scope. The ID defaults to the given name.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::InvalidArgument` if `name` is absent, and
    /// `StorageError::Duplicate` if the ID or name is taken in the realm.
    async fn add(
        &self,
        realm_id: &str,
        id: Option<&str>,
        name: Option<&str>,
    ) -> StorageResult<ClientScope>;

    /// Adds a new scope whose ID is its name.
    ///
    /// ## Errors
    ///
    /// See [`ClientScopeProvider::add`].
    async fn create(&self, realm_id: &str, name: &str) -> StorageResult<ClientScope> {
        self.add(realm_id, None, Some(name)).await
    }

    /// Persists changes made to a scope returned by this provider.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the scope no longer exists, and
    /// `StorageError::Duplicate` if a rename collides with another scope.
    async fn update(&self, scope: &ClientScope) -> StorageResult<()>;

    /// Removes a scope. Returns `false` if the ID is absent or unknown.
    async fn remove(&self, realm_id: &str, id: Option<&str>) -> StorageResult<bool>;

    /// Removes every scope of a realm, one by one with notifications.
    async fn remove_all(&self, realm_id: &str) -> StorageResult<()>;

    /// Gets a scope by ID. Blank or unknown IDs yield `None`.
    async fn get_by_id(&self, realm_id: &str, id: Option<&str>)
        -> StorageResult<Option<ClientScope>>;

    /// Lists scopes with exactly the given protocol.
    ///
    /// Returns `None` when no protocol is given.
    async fn list_by_protocol(
        &self,
        realm_id: &str,
        protocol: Option<&str>,
    ) -> StorageResult<Option<Vec<ClientScope>>>;

    /// Lists scopes whose attributes contain all (or, with `match_any`,
    /// at least one) of the given key/value pairs.
    ///
    /// Scopes without attributes never match; an empty search map yields
    /// an empty result.
    async fn list_by_attributes(
        &self,
        realm_id: &str,
        search: &HashMap<String, String>,
        match_any: bool,
    ) -> StorageResult<Vec<ClientScope>>;

    /// Drops every scope of a realm that is itself being removed.
    ///
    /// No removal notifications are raised.
    async fn pre_remove_realm(&self, realm_id: &str) -> StorageResult<()>;
}
