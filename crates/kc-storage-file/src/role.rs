//! File-backed role storage provider.

use std::any::Any;

use async_trait::async_trait;
use kc_model::Role;
use kc_spi::Provider;
use kc_storage::{EntityStore, RoleProvider, StorageError, StorageResult};

use crate::entities::RoleEntity;
use crate::store::FileEntityStore;

const ENTITY_TYPE: &str = "Role";

/// File-backed role storage provider.
#[derive(Debug)]
pub struct FileRoleProvider<S = FileEntityStore<RoleEntity>> {
    store: S,
}

impl<S> FileRoleProvider<S>
where
    S: EntityStore<RoleEntity>,
{
    /// Creates a role provider over the given store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    async fn roles_where(
        &self,
        realm_id: &str,
        keep: impl Fn(&Role) -> bool + Send,
    ) -> StorageResult<Vec<Role>> {
        let mut roles: Vec<Role> = self
            .store
            .read_realm(realm_id)
            .await?
            .into_iter()
            .map(Role::from)
            .filter(|r| keep(r))
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }
}

#[async_trait]
impl<S> RoleProvider for FileRoleProvider<S>
where
    S: EntityStore<RoleEntity>,
{
    async fn create(&self, role: &Role) -> StorageResult<()> {
        if self.store.exists(&role.id, &role.realm_id).await? {
            return Err(StorageError::duplicate(ENTITY_TYPE, "id", role.id.as_str()));
        }

        let name_taken = self
            .store
            .read_realm(&role.realm_id)
            .await?
            .iter()
            .any(|r| r.client_id == role.client_id && r.name == role.name);
        if name_taken {
            return Err(StorageError::duplicate(ENTITY_TYPE, "name", role.name.as_str()));
        }

        tracing::debug!(realm_id = %role.realm_id, id = %role.id, name = %role.name, "create role");
        self.store.update(&RoleEntity::from(role)).await
    }

    async fn delete(&self, realm_id: &str, id: &str) -> StorageResult<()> {
        if !self.store.exists(id, realm_id).await? {
            return Err(StorageError::not_found(ENTITY_TYPE, id));
        }
        self.store.delete_by_id(id, realm_id).await
    }

    async fn get_by_id(&self, realm_id: &str, id: &str) -> StorageResult<Option<Role>> {
        Ok(self.store.read(id, realm_id).await?.map(Role::from))
    }

    async fn list_realm_roles(&self, realm_id: &str) -> StorageResult<Vec<Role>> {
        self.roles_where(realm_id, Role::is_realm_role).await
    }

    async fn list_client_roles(
        &self,
        realm_id: &str,
        client_id: &str,
    ) -> StorageResult<Vec<Role>> {
        self.roles_where(realm_id, |r| r.belongs_to_client(client_id))
            .await
    }

    async fn pre_remove_realm(&self, realm_id: &str) -> StorageResult<()> {
        tracing::trace!(realm_id, "pre-remove realm roles");
        self.store.delete_by_realm_id(realm_id).await
    }
}

impl<S> Provider for FileRoleProvider<S>
where
    S: EntityStore<RoleEntity> + std::fmt::Debug + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}
