//! Group hierarchy accessor.
//!
//! [`GroupAdapter`] wraps a [`Group`] and resolves its parent and role grants
//! through the group and role providers. Mutations are buffered on the
//! adapter and written once by [`GroupAdapter::save`].
//!
//! Parents are referenced by ID only; nothing here owns the parent. Walking
//! up the hierarchy tracks visited IDs, so a loop in stored parent links is
//! reported as [`StorageError::HierarchyCycle`] instead of recursing forever.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use kc_model::{Group, Role};
use kc_storage::{GroupProvider, RoleProvider, StorageError, StorageResult};

const ENTITY_TYPE: &str = "Group";

/// A group bound to the providers needed to navigate it.
pub struct GroupAdapter {
    group: Group,
    groups: Arc<dyn GroupProvider>,
    roles: Arc<dyn RoleProvider>,
    dirty: bool,
}

impl GroupAdapter {
    /// Wraps a group.
    #[must_use]
    pub fn new(
        group: Group,
        groups: Arc<dyn GroupProvider>,
        roles: Arc<dyn RoleProvider>,
    ) -> Self {
        Self {
            group,
            groups,
            roles,
            dirty: false,
        }
    }

    /// Loads and wraps a stored group.
    pub async fn load(
        realm_id: &str,
        id: &str,
        groups: Arc<dyn GroupProvider>,
        roles: Arc<dyn RoleProvider>,
    ) -> StorageResult<Option<Self>> {
        let group = groups.get_by_id(realm_id, id).await?;
        Ok(group.map(|g| Self::new(g, groups, roles)))
    }

    fn wrap(&self, group: Group) -> Self {
        Self::new(group, Arc::clone(&self.groups), Arc::clone(&self.roles))
    }

    /// The wrapped group, including unsaved changes.
    #[must_use]
    pub const fn group(&self) -> &Group {
        &self.group
    }

    /// Unwraps the group, discarding unsaved state tracking.
    #[must_use]
    pub fn into_group(self) -> Group {
        self.group
    }

    /// Group ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.group.id
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.group.name
    }

    /// Renames the group. The ID is unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.group.name = name.into();
        self.dirty = true;
    }

    /// Group description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.group.description.as_deref()
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.group.description = description;
        self.dirty = true;
    }

    /// Whether there are changes not yet written by [`Self::save`].
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes pending changes through the group provider.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the group is no longer stored.
    pub async fn save(&mut self) -> StorageResult<()> {
        if !self.dirty {
            return Ok(());
        }
        self.groups.update(&self.group).await?;
        self.dirty = false;
        tracing::trace!(realm_id = %self.group.realm_id, id = %self.group.id, "group saved");
        Ok(())
    }

    // === Hierarchy ===

    /// Parent group ID.
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.group.parent_id.as_deref()
    }

    /// Resolves the parent group, if any.
    pub async fn parent(&self) -> StorageResult<Option<Self>> {
        let Some(parent_id) = self.parent_id() else {
            return Ok(None);
        };
        let parent = self.groups.get_by_id(&self.group.realm_id, parent_id).await?;
        Ok(parent.map(|g| self.wrap(g)))
    }

    /// Sets or clears the parent. Making a group its own parent is a no-op.
    pub fn set_parent(&mut self, parent: Option<&Group>) {
        let parent_id = parent.map(|p| p.id.clone());
        if self.group.set_parent_id(parent_id) {
            self.dirty = true;
        }
    }

    /// Moves `child` under this group.
    pub fn add_child(&self, child: &mut Self) {
        child.set_parent(Some(&self.group));
    }

    /// Detaches `child` if it is currently a child of this group.
    pub fn remove_child(&self, child: &mut Self) {
        if child.parent_id() == Some(self.id()) {
            child.set_parent(None);
        }
    }

    /// Lists the stored direct children of this group.
    pub async fn children(&self) -> StorageResult<Vec<Self>> {
        let children = self
            .groups
            .list_children(&self.group.realm_id, &self.group.id)
            .await?;
        Ok(children.into_iter().map(|g| self.wrap(g)).collect())
    }

    // === Role Mappings ===

    /// Grants a role directly to this group.
    pub fn grant_role(&mut self, role: &Role) {
        if self.group.grant_role(role.id.as_str()) {
            self.dirty = true;
        }
    }

    /// Removes a direct role grant.
    pub fn delete_role_mapping(&mut self, role: &Role) {
        if self.group.remove_role(&role.id) {
            self.dirty = true;
        }
    }

    /// Checks whether the role is granted directly to this group.
    #[must_use]
    pub fn has_direct_role(&self, role: &Role) -> bool {
        self.group.has_direct_role(&role.id)
    }

    /// Checks whether the role is granted to this group or an ancestor,
    /// directly or through a composite role.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::HierarchyCycle` if the parent chain loops.
    pub async fn has_role(&self, role: &Role) -> StorageResult<bool> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = Some(self.group.clone());

        while let Some(group) = current {
            if !visited.insert(group.id.clone()) {
                tracing::warn!(realm_id = %group.realm_id, id = %group.id, "group hierarchy cycle");
                return Err(StorageError::cycle(ENTITY_TYPE, group.id));
            }
            if self.grants(&group, role).await? {
                return Ok(true);
            }
            current = match &group.parent_id {
                Some(parent_id) => self.groups.get_by_id(&group.realm_id, parent_id).await?,
                None => None,
            };
        }
        Ok(false)
    }

    /// Whether `group` grants `role` itself or through composite expansion.
    async fn grants(&self, group: &Group, role: &Role) -> StorageResult<bool> {
        if group.has_direct_role(&role.id) {
            return Ok(true);
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = group.granted_roles.iter().cloned().collect();
        while let Some(role_id) = queue.pop_front() {
            if role_id == role.id {
                return Ok(true);
            }
            if !seen.insert(role_id.clone()) {
                continue;
            }
            if let Some(granted) = self.roles.get_by_id(&group.realm_id, &role_id).await? {
                queue.extend(granted.composite_roles);
            }
        }
        Ok(false)
    }

    /// Resolves the directly granted roles, sorted by name.
    ///
    /// Grants pointing at roles that no longer exist are skipped.
    pub async fn role_mappings(&self) -> StorageResult<Vec<Role>> {
        let mut roles = Vec::with_capacity(self.group.granted_roles.len());
        for role_id in &self.group.granted_roles {
            match self.roles.get_by_id(&self.group.realm_id, role_id).await? {
                Some(role) => roles.push(role),
                None => {
                    tracing::warn!(
                        group_id = %self.group.id,
                        role_id = %role_id,
                        "granted role not found"
                    );
                }
            }
        }
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    /// Directly granted realm roles.
    pub async fn realm_role_mappings(&self) -> StorageResult<Vec<Role>> {
        let mut roles = self.role_mappings().await?;
        roles.retain(Role::is_realm_role);
        Ok(roles)
    }

    /// Directly granted roles of one client.
    pub async fn client_role_mappings(&self, client_id: &str) -> StorageResult<Vec<Role>> {
        let mut roles = self.role_mappings().await?;
        roles.retain(|r| r.belongs_to_client(client_id));
        Ok(roles)
    }

    // === Attributes ===

    /// Sets an attribute to a single value.
    pub fn set_single_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.group.set_single_attribute(name, value);
        self.dirty = true;
    }

    /// Sets an attribute from a value list; only the first value is stored.
    pub fn set_attribute(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.group.set_attribute(name, values);
        self.dirty = true;
    }

    /// Removes an attribute.
    pub fn remove_attribute(&mut self, name: &str) {
        if self.group.remove_attribute(name).is_some() {
            self.dirty = true;
        }
    }

    /// First value of an attribute.
    #[must_use]
    pub fn first_attribute(&self, name: &str) -> Option<&str> {
        self.group.get_first_attribute(name)
    }

    /// Values of an attribute (at most one).
    #[must_use]
    pub fn attribute(&self, name: &str) -> Vec<String> {
        self.group.get_attribute(name)
    }

    /// All attributes in multi-value form.
    #[must_use]
    pub fn attributes(&self) -> BTreeMap<String, Vec<String>> {
        self.group.multi_valued_attributes()
    }
}

impl fmt::Debug for GroupAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupAdapter")
            .field("group", &self.group)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
