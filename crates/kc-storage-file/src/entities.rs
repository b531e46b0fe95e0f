//! On-disk entity records.
//!
//! Each record maps to one JSON document. Field names are camelCase.

use std::collections::BTreeMap;

use kc_storage::Entity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An entity that can live in a [`crate::FileEntityStore`].
pub trait FileEntity: Entity + Serialize + DeserializeOwned + std::fmt::Debug {
    /// Directory below the store root holding this kind.
    const DIRECTORY: &'static str;
}

/// Client scope document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientScopeEntity {
    /// Identifier, unique within the realm.
    pub id: String,
    /// Owning realm.
    pub realm_id: String,
    /// Name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Protocol tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Attribute values per key.
    #[serde(default)]
    pub multivalued_attributes: BTreeMap<String, Vec<String>>,
}

impl Entity for ClientScopeEntity {
    const KIND: &'static str = "ClientScope";

    fn id(&self) -> &str {
        &self.id
    }

    fn realm_id(&self) -> &str {
        &self.realm_id
    }
}

impl FileEntity for ClientScopeEntity {
    const DIRECTORY: &'static str = "client-scopes";
}

/// Group document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntity {
    /// Identifier, unique within the realm.
    pub id: String,
    /// Owning realm.
    pub realm_id: String,
    /// Name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent group ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Single-valued attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// IDs of directly granted roles.
    #[serde(default)]
    pub granted_roles: Vec<String>,
}

impl Entity for GroupEntity {
    const KIND: &'static str = "Group";

    fn id(&self) -> &str {
        &self.id
    }

    fn realm_id(&self) -> &str {
        &self.realm_id
    }
}

impl FileEntity for GroupEntity {
    const DIRECTORY: &'static str = "groups";
}

/// Role document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleEntity {
    /// Identifier, unique within the realm.
    pub id: String,
    /// Owning realm.
    pub realm_id: String,
    /// Name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning client for client roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// IDs of included roles.
    #[serde(default)]
    pub composite_roles: Vec<String>,
}

impl Entity for RoleEntity {
    const KIND: &'static str = "Role";

    fn id(&self) -> &str {
        &self.id
    }

    fn realm_id(&self) -> &str {
        &self.realm_id
    }
}

impl FileEntity for RoleEntity {
    const DIRECTORY: &'static str = "roles";
}
