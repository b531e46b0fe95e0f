//! Role domain model.
//!
//! Roles are used for role-based access control (RBAC).
//! They can be realm-level or client-level roles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A Keycloak role.
///
/// Roles represent permissions that can be granted to groups. They can be
/// realm roles (apply across the realm) or client roles (specific to a
/// particular client application).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    // === Identity ===
    /// Unique identifier.
    pub id: String,
    /// Role name (unique within realm or client).
    pub name: String,
    /// Role description.
    pub description: Option<String>,

    // === Scope ===
    /// Realm this role belongs to.
    pub realm_id: String,
    /// Client this role belongs to (None for realm roles).
    pub client_id: Option<String>,

    // === Composite Roles ===
    /// Composite role IDs (roles that this role includes).
    pub composite_roles: Vec<String>,
}

impl Role {
    /// Creates a new realm role with a generated ID.
    #[must_use]
    pub fn new_realm_role(realm_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            description: None,
            realm_id: realm_id.into(),
            client_id: None,
            composite_roles: Vec::new(),
        }
    }

    /// Creates a new client role with a generated ID.
    #[must_use]
    pub fn new_client_role(
        realm_id: impl Into<String>,
        client_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let mut role = Self::new_realm_role(realm_id, name);
        role.client_id = Some(client_id.into());
        role
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Adds a composite role.
    #[must_use]
    pub fn with_composite(mut self, role_id: impl Into<String>) -> Self {
        let role_id = role_id.into();
        if !self.composite_roles.contains(&role_id) {
            self.composite_roles.push(role_id);
        }
        self
    }

    /// Checks if this is a realm role.
    #[must_use]
    pub const fn is_realm_role(&self) -> bool {
        self.client_id.is_none()
    }

    /// Checks if this is a client role.
    #[must_use]
    pub const fn is_client_role(&self) -> bool {
        self.client_id.is_some()
    }

    /// Checks if this is a composite role.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        !self.composite_roles.is_empty()
    }

    /// Checks if this role belongs to the given client.
    #[must_use]
    pub fn belongs_to_client(&self, client_id: &str) -> bool {
        self.client_id.as_deref() == Some(client_id)
    }

    /// Gets the full role name (`client_id.role_name` for client roles).
    #[must_use]
    pub fn full_name(&self, client_id_str: Option<&str>) -> String {
        match (&self.client_id, client_id_str) {
            (Some(_), Some(client)) => format!("{}.{}", client, self.name),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realm_role_creation() {
        let role = Role::new_realm_role("desert", "admin");

        assert_eq!(role.name, "admin");
        assert_eq!(role.realm_id, "desert");
        assert!(role.is_realm_role());
        assert!(!role.is_client_role());
        assert!(!role.is_composite());
    }

    #[test]
    fn client_role_creation() {
        let role = Role::new_client_role("desert", "caravan-app", "manager");

        assert!(role.is_client_role());
        assert!(role.belongs_to_client("caravan-app"));
        assert!(!role.belongs_to_client("other-app"));
    }

    #[test]
    fn composite_role_ignores_duplicates() {
        let role = Role::new_realm_role("desert", "super-admin")
            .with_composite("sub")
            .with_composite("sub");

        assert!(role.is_composite());
        assert_eq!(role.composite_roles, vec!["sub".to_string()]);
    }

    #[test]
    fn full_name_formatting() {
        let realm_role = Role::new_realm_role("desert", "admin");
        assert_eq!(realm_role.full_name(None), "admin");

        let client_role = Role::new_client_role("desert", "client-uuid", "manager");
        assert_eq!(client_role.full_name(Some("my-app")), "my-app.manager");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = Role::new_realm_role("desert", "a");
        let b = Role::new_realm_role("desert", "a");
        assert_ne!(a.id, b.id);
    }
}
