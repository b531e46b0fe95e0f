//! File-backed client scope provider.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use kc_model::ClientScope;
use kc_spi::{InvalidationEvent, KeycloakSession, Provider};
use kc_storage::{ClientScopeProvider, EntityStore, StorageError, StorageResult};

use crate::entities::ClientScopeEntity;
use crate::store::FileEntityStore;

const ENTITY_TYPE: &str = "ClientScope";

/// Client scope directory over an entity store.
///
/// Enforces per-realm uniqueness of scope IDs and names. Removals are
/// announced on the session before and after the document is deleted.
#[derive(Debug)]
pub struct FileClientScopeProvider<S = FileEntityStore<ClientScopeEntity>> {
    session: Arc<KeycloakSession>,
    store: S,
}

impl<S> FileClientScopeProvider<S>
where
    S: EntityStore<ClientScopeEntity>,
{
    /// Creates a provider over the given store.
    #[must_use]
    pub const fn new(session: Arc<KeycloakSession>, store: S) -> Self {
        Self { session, store }
    }

    async fn realm_scopes(&self, realm_id: &str) -> StorageResult<Vec<ClientScope>> {
        Ok(self
            .store
            .read_realm(realm_id)
            .await?
            .into_iter()
            .map(ClientScope::from)
            .collect())
    }

    async fn name_taken(
        &self,
        realm_id: &str,
        name: &str,
        except_id: Option<&str>,
    ) -> StorageResult<bool> {
        Ok(self
            .store
            .read_realm(realm_id)
            .await?
            .iter()
            .any(|e| e.name == name && Some(e.id.as_str()) != except_id))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn sort_by_name(scopes: &mut [ClientScope]) {
    scopes.sort_by(|a, b| a.name.cmp(&b.name));
}

#[async_trait]
impl<S> ClientScopeProvider for FileClientScopeProvider<S>
where
    S: EntityStore<ClientScopeEntity>,
{
    async fn list(&self, realm_id: &str) -> StorageResult<Vec<ClientScope>> {
        let mut scopes = self.realm_scopes(realm_id).await?;
        sort_by_name(&mut scopes);
        Ok(scopes)
    }

    async fn add(
        &self,
        realm_id: &str,
        id: Option<&str>,
        name: Option<&str>,
    ) -> StorageResult<ClientScope> {
        let name = non_blank(name)
            .ok_or_else(|| StorageError::invalid_argument("name cannot be null"))?;
        let id = non_blank(id).unwrap_or(name);

        if self.store.exists(id, realm_id).await? {
            return Err(StorageError::duplicate(ENTITY_TYPE, "id", id));
        }

        let normalized = ClientScope::normalize_name(name);
        if self.name_taken(realm_id, &normalized, None).await? {
            return Err(StorageError::duplicate(ENTITY_TYPE, "name", normalized));
        }

        tracing::trace!(realm_id, id, name = %normalized, "add client scope");
        let scope = ClientScope::new(realm_id, id, name);
        self.store.update(&ClientScopeEntity::from(&scope)).await?;
        Ok(scope)
    }

    async fn update(&self, scope: &ClientScope) -> StorageResult<()> {
        if !self.store.exists(&scope.id, &scope.realm_id).await? {
            return Err(StorageError::not_found(ENTITY_TYPE, scope.id.as_str()));
        }

        let entity = ClientScopeEntity::from(scope);
        if self
            .name_taken(&scope.realm_id, &entity.name, Some(scope.id.as_str()))
            .await?
        {
            return Err(StorageError::duplicate(ENTITY_TYPE, "name", entity.name));
        }

        tracing::trace!(realm_id = %scope.realm_id, id = %scope.id, "update client scope");
        self.store.update(&entity).await
    }

    async fn remove(&self, realm_id: &str, id: Option<&str>) -> StorageResult<bool> {
        let Some(scope) = self.get_by_id(realm_id, id).await? else {
            return Ok(false);
        };

        self.session.invalidate(&InvalidationEvent::ClientScopeBeforeRemove {
            realm_id: realm_id.to_string(),
            scope: scope.clone(),
        });
        self.store.delete_by_id(&scope.id, realm_id).await?;
        tracing::debug!(realm_id, id = %scope.id, "client scope removed");
        self.session
            .invalidate(&InvalidationEvent::ClientScopeAfterRemove { scope });
        Ok(true)
    }

    async fn remove_all(&self, realm_id: &str) -> StorageResult<()> {
        tracing::trace!(realm_id, "remove client scopes");
        // Collect first; removal mutates the directory being listed.
        let ids: Vec<String> = self
            .realm_scopes(realm_id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        for id in &ids {
            self.remove(realm_id, Some(id.as_str())).await?;
        }
        Ok(())
    }

    async fn get_by_id(
        &self,
        realm_id: &str,
        id: Option<&str>,
    ) -> StorageResult<Option<ClientScope>> {
        let Some(id) = non_blank(id) else {
            return Ok(None);
        };

        tracing::trace!(realm_id, id, "get client scope by id");
        Ok(self
            .store
            .read(id, realm_id)
            .await?
            .filter(|e| e.realm_id == realm_id)
            .map(ClientScope::from))
    }

    async fn list_by_protocol(
        &self,
        realm_id: &str,
        protocol: Option<&str>,
    ) -> StorageResult<Option<Vec<ClientScope>>> {
        let Some(protocol) = protocol else {
            return Ok(None);
        };

        tracing::trace!(realm_id, protocol, "list client scopes by protocol");
        let mut scopes: Vec<ClientScope> = self
            .realm_scopes(realm_id)
            .await?
            .into_iter()
            .filter(|s| s.protocol.as_deref() == Some(protocol))
            .collect();
        sort_by_name(&mut scopes);
        Ok(Some(scopes))
    }

    async fn list_by_attributes(
        &self,
        realm_id: &str,
        search: &HashMap<String, String>,
        match_any: bool,
    ) -> StorageResult<Vec<ClientScope>> {
        if search.is_empty() {
            return Ok(Vec::new());
        }

        tracing::trace!(realm_id, ?search, match_any, "list client scopes by attributes");
        let mut scopes: Vec<ClientScope> = self
            .realm_scopes(realm_id)
            .await?
            .into_iter()
            .filter(|scope| !scope.attributes.is_empty())
            .filter(|scope| {
                let present = |(k, v): (&String, &String)| scope.has_attribute_value(k, v);
                if match_any {
                    search.iter().any(present)
                } else {
                    search.iter().all(present)
                }
            })
            .collect();
        sort_by_name(&mut scopes);
        Ok(scopes)
    }

    async fn pre_remove_realm(&self, realm_id: &str) -> StorageResult<()> {
        tracing::trace!(realm_id, "pre-remove realm client scopes");
        self.store.delete_by_realm_id(realm_id).await
    }
}

impl<S> Provider for FileClientScopeProvider<S>
where
    S: EntityStore<ClientScopeEntity> + std::fmt::Debug + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use kc_core::FileStoreConfig;
    use kc_spi::InvalidationListener;
    use parking_lot::Mutex;
    use tempfile::TempDir;

    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        events: Mutex<Vec<InvalidationEvent>>,
    }

    impl InvalidationListener for Recorder {
        fn invalidate(&self, event: &InvalidationEvent) {
            self.events.lock().push(event.clone());
        }
    }

    fn provider(dir: &TempDir) -> (FileClientScopeProvider, Arc<Recorder>) {
        let session = Arc::new(KeycloakSession::new());
        let recorder = Arc::new(Recorder::default());
        session.add_listener(recorder.clone() as Arc<dyn InvalidationListener>);
        let store = FileEntityStore::new(&FileStoreConfig::new(dir.path()));
        (FileClientScopeProvider::new(session, store), recorder)
    }

    #[tokio::test]
    async fn add_defaults_id_to_name() {
        let dir = TempDir::new().unwrap();
        let (scopes, _) = provider(&dir);

        let scope = scopes.create("desert", "Atacama").await.unwrap();
        assert_eq!(scope.id, "Atacama");
        assert_eq!(scope.realm_id, "desert");

        let explicit = scopes
            .add("desert", Some("scope-1"), Some("Mojave"))
            .await
            .unwrap();
        assert_eq!(explicit.id, "scope-1");
        assert_eq!(explicit.name, "Mojave");
    }

    #[tokio::test]
    async fn add_rejects_missing_name() {
        let dir = TempDir::new().unwrap();
        let (scopes, _) = provider(&dir);

        let err = scopes.add("desert", None, None).await.unwrap_err();
        assert!(err.is_invalid_argument());

        let err = scopes.add("desert", Some("id"), Some("  ")).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn duplicate_name_with_other_id_is_rejected() {
        let dir = TempDir::new().unwrap();
        let (scopes, _) = provider(&dir);

        scopes.add("desert", Some("a"), Some("Great Sandy")).await.unwrap();
        let err = scopes
            .add("desert", Some("b"), Some("Great_Sandy"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StorageError::Duplicate { field: "name", .. }
        ));
    }

    #[tokio::test]
    async fn update_persists_mutations() {
        let dir = TempDir::new().unwrap();
        let (scopes, _) = provider(&dir);

        let mut scope = scopes.create("desert", "Sahara").await.unwrap();
        scope.set_protocol(Some("openid-connect".to_string()));
        scope.set_attribute("k1", "v1");
        scopes.update(&scope).await.unwrap();

        let read = scopes.get_by_id("desert", Some("Sahara")).await.unwrap().unwrap();
        assert_eq!(read, scope);
    }

    #[tokio::test]
    async fn update_rejects_unknown_and_colliding_scopes() {
        let dir = TempDir::new().unwrap();
        let (scopes, _) = provider(&dir);

        let ghost = ClientScope::new("desert", "ghost", "ghost");
        assert!(scopes.update(&ghost).await.unwrap_err().is_not_found());

        scopes.create("desert", "Sahara").await.unwrap();
        let mut gobi = scopes.create("desert", "Gobi").await.unwrap();
        gobi.set_name("Sahara");
        assert!(scopes.update(&gobi).await.unwrap_err().is_duplicate());
    }

    #[tokio::test]
    async fn remove_raises_notifications() {
        let dir = TempDir::new().unwrap();
        let (scopes, recorder) = provider(&dir);

        let scope = scopes.create("desert", "Sonora").await.unwrap();
        assert!(scopes.remove("desert", Some("Sonora")).await.unwrap());

        let events = recorder.events.lock();
        assert_eq!(
            *events,
            vec![
                InvalidationEvent::ClientScopeBeforeRemove {
                    realm_id: "desert".to_string(),
                    scope: scope.clone(),
                },
                InvalidationEvent::ClientScopeAfterRemove { scope },
            ]
        );
    }

    #[tokio::test]
    async fn remove_unknown_raises_nothing() {
        let dir = TempDir::new().unwrap();
        let (scopes, recorder) = provider(&dir);

        assert!(!scopes.remove("desert", Some("unknown")).await.unwrap());
        assert!(!scopes.remove("desert", None).await.unwrap());
        assert!(recorder.events.lock().is_empty());
    }

    #[tokio::test]
    async fn protocol_filter() {
        let dir = TempDir::new().unwrap();
        let (scopes, _) = provider(&dir);

        for (name, protocol) in [("Sahara", "openid-connect"), ("Gobi", "saml")] {
            let mut scope = scopes.create("desert", name).await.unwrap();
            scope.set_protocol(Some(protocol.to_string()));
            scopes.update(&scope).await.unwrap();
        }
        scopes.create("desert", "Namib").await.unwrap();

        assert!(scopes.list_by_protocol("desert", None).await.unwrap().is_none());

        let saml = scopes
            .list_by_protocol("desert", Some("saml"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saml.len(), 1);
        assert_eq!(saml[0].name, "Gobi");
    }

    #[tokio::test]
    async fn empty_attribute_search_matches_nothing() {
        let dir = TempDir::new().unwrap();
        let (scopes, _) = provider(&dir);

        let mut scope = scopes.create("desert", "Sahara").await.unwrap();
        scope.set_attribute("k", "v");
        scopes.update(&scope).await.unwrap();

        let found = scopes
            .list_by_attributes("desert", &HashMap::new(), true)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn pre_remove_realm_skips_notifications() {
        let dir = TempDir::new().unwrap();
        let (scopes, recorder) = provider(&dir);

        scopes.create("desert", "Thar").await.unwrap();
        scopes.create("tundra", "Thar").await.unwrap();
        scopes.pre_remove_realm("desert").await.unwrap();

        assert!(scopes.list("desert").await.unwrap().is_empty());
        assert_eq!(scopes.list("tundra").await.unwrap().len(), 1);
        assert!(recorder.events.lock().is_empty());
    }

    #[test]
    fn provider_downcasts() {
        let dir = TempDir::new().unwrap();
        let (scopes, _) = provider(&dir);
        scopes.close();
        assert!(scopes
            .as_any()
            .downcast_ref::<FileClientScopeProvider>()
            .is_some());
    }
}
