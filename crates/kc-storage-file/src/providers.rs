//! Aggregate file-backed providers sharing one root directory and session.

use std::sync::Arc;

use kc_core::FileStoreConfig;
use kc_spi::{KeycloakSession, Provider};
use kc_storage::{ClientScopeProvider, GroupProvider, RoleProvider, StorageResult};

use crate::client_scope::FileClientScopeProvider;
use crate::group::FileGroupProvider;
use crate::hierarchy::GroupAdapter;
use crate::role::FileRoleProvider;
use crate::store::FileEntityStore;

/// Client scope, group and role providers over one data directory.
#[derive(Debug, Clone)]
pub struct FileStorageProviders {
    /// Client scope directory.
    pub client_scope: Arc<FileClientScopeProvider>,

    /// Group provider.
    pub group: Arc<FileGroupProvider>,

    /// Role provider.
    pub role: Arc<FileRoleProvider>,
}

impl FileStorageProviders {
    /// Creates the providers below `config.root_dir`.
    #[must_use]
    pub fn new(config: &FileStoreConfig, session: Arc<KeycloakSession>) -> Self {
        tracing::info!(root_dir = %config.root_dir.display(), "file storage initialized");
        Self {
            client_scope: Arc::new(FileClientScopeProvider::new(
                session,
                FileEntityStore::new(config),
            )),
            group: Arc::new(FileGroupProvider::new(FileEntityStore::new(config))),
            role: Arc::new(FileRoleProvider::new(FileEntityStore::new(config))),
        }
    }

    /// Loads a group wrapped for hierarchy and role navigation.
    pub async fn group_adapter(
        &self,
        realm_id: &str,
        id: &str,
    ) -> StorageResult<Option<GroupAdapter>> {
        let groups: Arc<dyn GroupProvider> = self.group.clone();
        let roles: Arc<dyn RoleProvider> = self.role.clone();
        GroupAdapter::load(realm_id, id, groups, roles).await
    }

    /// Drops everything stored for a realm that is being removed.
    pub async fn pre_remove_realm(&self, realm_id: &str) -> StorageResult<()> {
        self.client_scope.pre_remove_realm(realm_id).await?;
        self.group.pre_remove_realm(realm_id).await?;
        self.role.pre_remove_realm(realm_id).await
    }

    /// Closes every provider.
    pub fn close(&self) {
        self.client_scope.close();
        self.group.close();
        self.role.close();
    }
}

#[cfg(test)]
mod tests {
    use kc_model::{Group, Role};
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn realm_removal_clears_all_kinds() {
        let dir = TempDir::new().unwrap();
        let providers = FileStorageProviders::new(
            &FileStoreConfig::new(dir.path()),
            Arc::new(KeycloakSession::new()),
        );

        providers.client_scope.create("desert", "profile").await.unwrap();
        providers.group.create(&Group::new("desert", "nomads")).await.unwrap();
        let admin = Role::new_realm_role("desert", "admin");
        providers.role.create(&admin).await.unwrap();

        let mut nomads = providers.group_adapter("desert", "nomads").await.unwrap().unwrap();
        nomads.grant_role(&admin);
        nomads.save().await.unwrap();
        assert!(nomads.has_role(&admin).await.unwrap());

        providers.pre_remove_realm("desert").await.unwrap();

        assert!(providers.client_scope.list("desert").await.unwrap().is_empty());
        assert_eq!(providers.group.count("desert").await.unwrap(), 0);
        assert!(providers.role.list_realm_roles("desert").await.unwrap().is_empty());
        providers.close();
    }
}
