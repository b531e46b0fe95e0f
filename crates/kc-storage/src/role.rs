//! Role storage provider trait.

use async_trait::async_trait;
use kc_model::Role;

use crate::error::StorageResult;

/// Provider for role storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait RoleProvider: Send + Sync {
    /// Creates a new role.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if the ID is taken, or a role with
    /// the same name exists in the same scope (realm or client).
    async fn create(&self, role: &Role) -> StorageResult<()>;

    /// Deletes a role by ID.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the role doesn't exist.
    async fn delete(&self, realm_id: &str, id: &str) -> StorageResult<()>;

    /// Gets a role by ID.
    async fn get_by_id(&self, realm_id: &str, id: &str) -> StorageResult<Option<Role>>;

    /// Lists all realm roles, sorted by name.
    async fn list_realm_roles(&self, realm_id: &str) -> StorageResult<Vec<Role>>;

    /// Lists all roles of a client, sorted by name.
    async fn list_client_roles(&self, realm_id: &str, client_id: &str)
        -> StorageResult<Vec<Role>>;

    /// Drops every role of a realm that is itself being removed.
    async fn pre_remove_realm(&self, realm_id: &str) -> StorageResult<()>;
}
