//! Client scope domain model.
//!
//! Client scopes bundle protocol claims and role scope mappings that can be
//! shared between clients of a realm.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known client scope attribute keys.
pub mod attributes {
    /// Whether the consent screen lists this scope.
    pub const DISPLAY_ON_CONSENT_SCREEN: &str = "display.on.consent.screen";
    /// Text shown on the consent screen.
    pub const CONSENT_SCREEN_TEXT: &str = "consent.screen.text";
    /// Whether the scope name is included in the token `scope` claim.
    pub const INCLUDE_IN_TOKEN_SCOPE: &str = "include.in.token.scope";
    /// Ordering hint for admin consoles.
    pub const GUI_ORDER: &str = "gui.order";
}

/// A Keycloak client scope.
///
/// The `id` and `name` are both unique within a realm. Attributes are kept
/// as ordered value lists per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientScope {
    /// Identifier, unique within the realm.
    pub id: String,
    /// Realm this scope belongs to.
    pub realm_id: String,
    /// Normalized scope name, unique within the realm.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Protocol tag such as `openid-connect` or `saml`.
    pub protocol: Option<String>,
    /// Custom attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl ClientScope {
    /// Creates a new client scope. The name is normalized.
    #[must_use]
    pub fn new(
        realm_id: impl Into<String>,
        id: impl Into<String>,
        name: impl AsRef<str>,
    ) -> Self {
        Self {
            id: id.into(),
            realm_id: realm_id.into(),
            name: Self::normalize_name(name.as_ref()),
            description: None,
            protocol: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Converts a scope name to its stored form (spaces become underscores).
    #[must_use]
    pub fn normalize_name(name: &str) -> String {
        name.replace(' ', "_")
    }

    /// Renames the scope, normalizing the new name.
    pub fn set_name(&mut self, name: &str) {
        self.name = Self::normalize_name(name);
    }

    /// Sets the protocol.
    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets or clears the protocol.
    pub fn set_protocol(&mut self, protocol: Option<String>) {
        self.protocol = protocol;
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Sets an attribute to a single value, replacing previous values.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), vec![value.into()]);
    }

    /// Sets all values of an attribute. An empty list removes it.
    pub fn set_attribute_values(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        if values.is_empty() {
            self.attributes.remove(&name);
        } else {
            self.attributes.insert(name, values);
        }
    }

    /// Removes an attribute.
    pub fn remove_attribute(&mut self, name: &str) -> Option<Vec<String>> {
        self.attributes.remove(name)
    }

    /// Gets the first value of an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Gets all values of an attribute.
    #[must_use]
    pub fn attribute_values(&self, name: &str) -> &[String] {
        self.attributes.get(name).map_or(&[], Vec::as_slice)
    }

    /// Checks whether `name` carries `value` among its values.
    #[must_use]
    pub fn has_attribute_value(&self, name: &str, value: &str) -> bool {
        self.attributes
            .get(name)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Whether the consent screen lists this scope (default `true`).
    #[must_use]
    pub fn is_display_on_consent_screen(&self) -> bool {
        self.bool_attribute(attributes::DISPLAY_ON_CONSENT_SCREEN, true)
    }

    /// Sets whether the consent screen lists this scope.
    pub fn set_display_on_consent_screen(&mut self, display: bool) {
        self.set_attribute(attributes::DISPLAY_ON_CONSENT_SCREEN, display.to_string());
    }

    /// Text shown on the consent screen.
    #[must_use]
    pub fn consent_screen_text(&self) -> Option<&str> {
        self.attribute(attributes::CONSENT_SCREEN_TEXT)
    }

    /// Sets the consent screen text.
    pub fn set_consent_screen_text(&mut self, text: impl Into<String>) {
        self.set_attribute(attributes::CONSENT_SCREEN_TEXT, text);
    }

    /// Whether the scope is included in the token `scope` claim (default `true`).
    #[must_use]
    pub fn is_include_in_token_scope(&self) -> bool {
        self.bool_attribute(attributes::INCLUDE_IN_TOKEN_SCOPE, true)
    }

    /// Sets whether the scope is included in the token `scope` claim.
    pub fn set_include_in_token_scope(&mut self, include: bool) {
        self.set_attribute(attributes::INCLUDE_IN_TOKEN_SCOPE, include.to_string());
    }

    /// Ordering hint for admin consoles.
    #[must_use]
    pub fn gui_order(&self) -> Option<&str> {
        self.attribute(attributes::GUI_ORDER)
    }

    /// Sets the ordering hint.
    pub fn set_gui_order(&mut self, order: impl Into<String>) {
        self.set_attribute(attributes::GUI_ORDER, order);
    }

    fn bool_attribute(&self, name: &str, default: bool) -> bool {
        self.attribute(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_normalized() {
        let scope = ClientScope::new("desert", "Great Sandy", "Great Sandy");

        assert_eq!(scope.id, "Great Sandy");
        assert_eq!(scope.name, "Great_Sandy");
    }

    #[test]
    fn attribute_accessors() {
        let mut scope = ClientScope::new("desert", "Gobi", "Gobi");
        scope.set_attribute("k1", "v1");
        scope.set_attribute_values("k2", vec!["a".to_string(), "b".to_string()]);

        assert_eq!(scope.attribute("k1"), Some("v1"));
        assert_eq!(scope.attribute_values("k2"), ["a", "b"]);
        assert!(scope.has_attribute_value("k2", "b"));
        assert!(!scope.has_attribute_value("k2", "c"));
        assert!(scope.attribute_values("missing").is_empty());

        scope.set_attribute_values("k2", Vec::new());
        assert!(!scope.attributes.contains_key("k2"));
        assert_eq!(scope.remove_attribute("k1"), Some(vec!["v1".to_string()]));
    }

    #[test]
    fn consent_defaults() {
        let mut scope = ClientScope::new("desert", "Namib", "Namib");
        assert!(scope.is_display_on_consent_screen());
        assert!(scope.is_include_in_token_scope());
        assert_eq!(scope.consent_screen_text(), None);

        scope.set_display_on_consent_screen(false);
        scope.set_include_in_token_scope(false);
        scope.set_consent_screen_text("Access your dunes");
        scope.set_gui_order("3");

        assert!(!scope.is_display_on_consent_screen());
        assert!(!scope.is_include_in_token_scope());
        assert_eq!(scope.consent_screen_text(), Some("Access your dunes"));
        assert_eq!(scope.gui_order(), Some("3"));
    }

    #[test]
    fn protocol_builder() {
        let scope = ClientScope::new("desert", "Thar", "Thar").with_protocol("saml");
        assert_eq!(scope.protocol.as_deref(), Some("saml"));
    }

    #[test]
    fn missing_attributes_deserialize_empty() {
        let scope: ClientScope = serde_json::from_str(
            r#"{"id":"a","realm_id":"r","name":"a","description":null,"protocol":null}"#,
        )
        .unwrap();
        assert!(scope.attributes.is_empty());
    }
}
