//! Group domain model.
//!
//! Groups provide a way to organize users and grant roles to many users at
//! once. Groups can be hierarchical: a group points at its parent by ID.
//!
//! Attributes are exposed through a multi-value API but hold a single value
//! per key. Setting several values keeps only the first one.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A Keycloak group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    // === Identity ===
    /// Unique identifier within the realm.
    pub id: String,
    /// Group name.
    pub name: String,
    /// Group description.
    pub description: Option<String>,

    // === Hierarchy ===
    /// Realm this group belongs to.
    pub realm_id: String,
    /// Parent group ID (None for top-level groups).
    pub parent_id: Option<String>,

    // === Custom Attributes ===
    /// Custom group attributes, one value per key.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    // === Role Mappings ===
    /// IDs of roles granted directly to this group.
    #[serde(default)]
    pub granted_roles: BTreeSet<String>,
}

impl Group {
    /// Creates a new top-level group. The ID is the group name.
    #[must_use]
    pub fn new(realm_id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            description: None,
            realm_id: realm_id.into(),
            parent_id: None,
            attributes: BTreeMap::new(),
            granted_roles: BTreeSet::new(),
        }
    }

    /// Creates a new child group.
    #[must_use]
    pub fn new_child(
        realm_id: impl Into<String>,
        parent_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let mut group = Self::new(realm_id, name);
        group.set_parent_id(Some(parent_id.into()));
        group
    }

    /// Overrides the ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Checks if this is a top-level group.
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Sets the parent ID. Pointing a group at itself is ignored.
    ///
    /// Returns whether the parent changed.
    pub fn set_parent_id(&mut self, parent_id: Option<String>) -> bool {
        if parent_id.as_deref() == Some(self.id.as_str()) || parent_id == self.parent_id {
            return false;
        }
        self.parent_id = parent_id;
        true
    }

    /// Sets an attribute to a single value.
    pub fn set_single_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Sets an attribute from a value list. Only the first value is kept;
    /// an empty list removes the attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        match values.into_iter().next() {
            Some(first) => {
                self.attributes.insert(name, first);
            }
            None => {
                self.attributes.remove(&name);
            }
        }
    }

    /// Removes an attribute.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Gets the values of an attribute (at most one).
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Vec<String> {
        self.attributes.get(name).cloned().into_iter().collect()
    }

    /// Gets the first value of an attribute.
    #[must_use]
    pub fn get_first_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Gets all attributes in their multi-value form.
    #[must_use]
    pub fn multi_valued_attributes(&self) -> BTreeMap<String, Vec<String>> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.clone(), vec![v.clone()]))
            .collect()
    }

    /// Grants a role. Returns whether it was newly granted.
    pub fn grant_role(&mut self, role_id: impl Into<String>) -> bool {
        self.granted_roles.insert(role_id.into())
    }

    /// Removes a role grant. Returns whether it was present.
    pub fn remove_role(&mut self, role_id: &str) -> bool {
        self.granted_roles.remove(role_id)
    }

    /// Checks if this group has a specific role granted directly.
    #[must_use]
    pub fn has_direct_role(&self, role_id: &str) -> bool {
        self.granted_roles.contains(role_id)
    }
}
