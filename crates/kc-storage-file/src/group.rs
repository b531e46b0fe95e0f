//! File-backed group storage provider.

use std::any::Any;
use std::collections::HashSet;

use async_trait::async_trait;
use kc_model::Group;
use kc_spi::Provider;
use kc_storage::{EntityStore, GroupProvider, GroupSearchCriteria, StorageError, StorageResult};

use crate::entities::GroupEntity;
use crate::store::FileEntityStore;

const ENTITY_TYPE: &str = "Group";

/// File-backed group storage provider.
#[derive(Debug)]
pub struct FileGroupProvider<S = FileEntityStore<GroupEntity>> {
    store: S,
}

impl<S> FileGroupProvider<S>
where
    S: EntityStore<GroupEntity>,
{
    /// Creates a group provider over the given store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    async fn realm_groups(&self, realm_id: &str) -> StorageResult<Vec<Group>> {
        let mut groups: Vec<Group> = self
            .store
            .read_realm(realm_id)
            .await?
            .into_iter()
            .map(Group::from)
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(groups)
    }

    /// Collects the IDs of every descendant of `id`, children first seen
    /// first. Loops in stored parent links are not followed twice.
    fn descendants(groups: &[Group], id: &str) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::from([id]);
        let mut queue = vec![id];
        let mut found = Vec::new();

        while let Some(current) = queue.pop() {
            for child in groups
                .iter()
                .filter(|g| g.parent_id.as_deref() == Some(current))
            {
                if seen.insert(child.id.as_str()) {
                    found.push(child.id.clone());
                    queue.push(child.id.as_str());
                }
            }
        }
        found
    }
}

#[async_trait]
impl<S> GroupProvider for FileGroupProvider<S>
where
    S: EntityStore<GroupEntity>,
{
    async fn create(&self, group: &Group) -> StorageResult<()> {
        if group.id.trim().is_empty() || group.name.trim().is_empty() {
            return Err(StorageError::invalid_argument("group id and name are required"));
        }

        let siblings = self.realm_groups(&group.realm_id).await?;
        if siblings.iter().any(|g| g.id == group.id) {
            return Err(StorageError::duplicate(ENTITY_TYPE, "id", group.id.as_str()));
        }
        if siblings
            .iter()
            .any(|g| g.parent_id == group.parent_id && g.name == group.name)
        {
            return Err(StorageError::duplicate(ENTITY_TYPE, "name", group.name.as_str()));
        }

        tracing::debug!(
            realm_id = %group.realm_id,
            id = %group.id,
            parent_id = ?group.parent_id,
            "create group"
        );
        self.store.update(&GroupEntity::from(group)).await
    }

    async fn update(&self, group: &Group) -> StorageResult<()> {
        if !self.store.exists(&group.id, &group.realm_id).await? {
            return Err(StorageError::not_found(ENTITY_TYPE, group.id.as_str()));
        }

        tracing::trace!(realm_id = %group.realm_id, id = %group.id, "update group");
        self.store.update(&GroupEntity::from(group)).await
    }

    async fn delete(&self, realm_id: &str, id: &str) -> StorageResult<()> {
        let groups = self.realm_groups(realm_id).await?;
        if !groups.iter().any(|g| g.id == id) {
            return Err(StorageError::not_found(ENTITY_TYPE, id));
        }

        for descendant in Self::descendants(&groups, id) {
            self.store.delete_by_id(&descendant, realm_id).await?;
        }
        self.store.delete_by_id(id, realm_id).await?;

        tracing::debug!(realm_id, id, "group deleted");
        Ok(())
    }

    async fn get_by_id(&self, realm_id: &str, id: &str) -> StorageResult<Option<Group>> {
        Ok(self.store.read(id, realm_id).await?.map(Group::from))
    }

    async fn list(&self, realm_id: &str) -> StorageResult<Vec<Group>> {
        self.realm_groups(realm_id).await
    }

    async fn search(
        &self,
        realm_id: &str,
        criteria: &GroupSearchCriteria,
    ) -> StorageResult<Vec<Group>> {
        let matching: Vec<Group> = self
            .realm_groups(realm_id)
            .await?
            .into_iter()
            .filter(|g| criteria.matches(g))
            .collect();
        Ok(criteria.paginate(matching))
    }

    async fn count(&self, realm_id: &str) -> StorageResult<u64> {
        let count = self.store.read_realm(realm_id).await?.len();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn pre_remove_realm(&self, realm_id: &str) -> StorageResult<()> {
        tracing::trace!(realm_id, "pre-remove realm groups");
        self.store.delete_by_realm_id(realm_id).await
    }
}

impl<S> Provider for FileGroupProvider<S>
where
    S: EntityStore<GroupEntity> + std::fmt::Debug + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}
