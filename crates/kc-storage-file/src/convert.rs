//! Conversion between on-disk entities and domain models.

use kc_model::{ClientScope, Group, Role};

use crate::entities::{ClientScopeEntity, GroupEntity, RoleEntity};

impl From<ClientScopeEntity> for ClientScope {
    fn from(entity: ClientScopeEntity) -> Self {
        Self {
            id: entity.id,
            realm_id: entity.realm_id,
            name: entity.name,
            description: entity.description,
            protocol: entity.protocol,
            attributes: entity.multivalued_attributes,
        }
    }
}

impl From<&ClientScope> for ClientScopeEntity {
    fn from(scope: &ClientScope) -> Self {
        Self {
            id: scope.id.clone(),
            realm_id: scope.realm_id.clone(),
            name: ClientScope::normalize_name(&scope.name),
            description: scope.description.clone(),
            protocol: scope.protocol.clone(),
            multivalued_attributes: scope.attributes.clone(),
        }
    }
}

impl From<GroupEntity> for Group {
    fn from(entity: GroupEntity) -> Self {
        // A stored self-reference is treated as no parent.
        let parent_id = entity.parent_id.filter(|p| *p != entity.id);
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            realm_id: entity.realm_id,
            parent_id,
            attributes: entity.attributes,
            granted_roles: entity.granted_roles.into_iter().collect(),
        }
    }
}

impl From<&Group> for GroupEntity {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            realm_id: group.realm_id.clone(),
            name: group.name.clone(),
            description: group.description.clone(),
            parent_id: group.parent_id.clone(),
            attributes: group.attributes.clone(),
            granted_roles: group.granted_roles.iter().cloned().collect(),
        }
    }
}

impl From<RoleEntity> for Role {
    fn from(entity: RoleEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            realm_id: entity.realm_id,
            client_id: entity.client_id,
            composite_roles: entity.composite_roles,
        }
    }
}

impl From<&Role> for RoleEntity {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.clone(),
            realm_id: role.realm_id.clone(),
            name: role.name.clone(),
            description: role.description.clone(),
            client_id: role.client_id.clone(),
            composite_roles: role.composite_roles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_scope_name_is_normalized_on_write() {
        let mut scope = ClientScope::new("desert", "sonora", "Sonora");
        scope.name = "Sonora Desert".to_string();

        let entity = ClientScopeEntity::from(&scope);
        assert_eq!(entity.name, "Sonora_Desert");
    }

    #[test]
    fn stored_self_parent_is_dropped() {
        let entity = GroupEntity {
            id: "nomads".to_string(),
            realm_id: "desert".to_string(),
            name: "nomads".to_string(),
            description: None,
            parent_id: Some("nomads".to_string()),
            attributes: std::collections::BTreeMap::new(),
            granted_roles: vec!["b".to_string(), "a".to_string(), "a".to_string()],
        };

        let group = Group::from(entity);
        assert!(group.is_top_level());
        assert_eq!(group.granted_roles.len(), 2);
    }

    #[test]
    fn group_entity_keeps_roles_sorted() {
        let mut group = Group::new("desert", "nomads");
        group.grant_role("z");
        group.grant_role("a");

        let entity = GroupEntity::from(&group);
        assert_eq!(entity.granted_roles, vec!["a".to_string(), "z".to_string()]);
    }
}
