//! File-backed entity store.
//!
//! Layout: `<root>/<kind directory>/<realm>/<id>.json`. Realm and ID path
//! segments are `b` + URL-safe base64 of the identifier, or `h` + hex SHA-256
//! when the encoding would be too long for a file name. Documents carry their
//! own ID and realm, so reads never rely on decoding a path.
//! Writes go to a temporary sibling file that is renamed into place.

use std::fmt;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use kc_core::FileStoreConfig;
use kc_storage::{EntityStore, StorageResult};
use sha2::{Digest, Sha256};
use tokio::fs;

use crate::entities::FileEntity;
use crate::error::{from_io_error, from_json_error};

const EXTENSION: &str = "json";

/// Longest base64 segment kept verbatim; leaves room for the prefix and
/// `.json.tmp` below the usual 255-byte file name limit.
const MAX_ENCODED_LEN: usize = 200;

/// Stores one entity kind as JSON documents below a root directory.
pub struct FileEntityStore<E> {
    dir: PathBuf,
    pretty: bool,
    _kind: PhantomData<fn() -> E>,
}

impl<E: FileEntity> FileEntityStore<E> {
    /// Creates a store for `E` below the configured root directory.
    #[must_use]
    pub fn new(config: &FileStoreConfig) -> Self {
        Self {
            dir: config.root_dir.join(E::DIRECTORY),
            pretty: config.pretty_json,
            _kind: PhantomData,
        }
    }

    /// Directory holding every document of this kind.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn realm_dir(&self, realm_id: &str) -> PathBuf {
        self.dir.join(encode_segment(realm_id))
    }

    fn entity_path(&self, id: &str, realm_id: &str) -> PathBuf {
        self.realm_dir(realm_id)
            .join(format!("{}.{EXTENSION}", encode_segment(id)))
    }

    async fn read_path(path: &Path) -> StorageResult<Option<E>> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(from_io_error(err, path)),
        };
        let entity = serde_json::from_slice(&bytes).map_err(|e| from_json_error(e, path))?;
        Ok(Some(entity))
    }

    /// Reads every document in one realm directory. Unreadable documents
    /// are skipped with a warning.
    async fn read_dir_entities(dir: &Path) -> StorageResult<Vec<E>> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(from_io_error(err, dir)),
        };

        let mut entities = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| from_io_error(e, dir))? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match Self::read_path(&path).await {
                Ok(Some(entity)) => entities.push(entity),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(
                        kind = E::KIND,
                        path = %path.display(),
                        error = %err,
                        "skipping unreadable document"
                    );
                }
            }
        }
        Ok(entities)
    }
}

impl<E> fmt::Debug for FileEntityStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEntityStore")
            .field("dir", &self.dir)
            .field("pretty", &self.pretty)
            .finish()
    }
}

#[async_trait]
impl<E: FileEntity> EntityStore<E> for FileEntityStore<E> {
    async fn read(&self, id: &str, realm_id: &str) -> StorageResult<Option<E>> {
        let path = self.entity_path(id, realm_id);
        Ok(Self::read_path(&path)
            .await?
            .filter(|e| e.id() == id && e.realm_id() == realm_id))
    }

    async fn read_all(&self) -> StorageResult<Vec<E>> {
        let mut realms = match fs::read_dir(&self.dir).await {
            Ok(realms) => realms,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(from_io_error(err, &self.dir)),
        };

        let mut entities = Vec::new();
        while let Some(realm) = realms
            .next_entry()
            .await
            .map_err(|e| from_io_error(e, &self.dir))?
        {
            let path = realm.path();
            let file_type = realm
                .file_type()
                .await
                .map_err(|e| from_io_error(e, &path))?;
            if file_type.is_dir() {
                entities.extend(Self::read_dir_entities(&path).await?);
            }
        }
        Ok(entities)
    }

    async fn read_realm(&self, realm_id: &str) -> StorageResult<Vec<E>> {
        let entities = Self::read_dir_entities(&self.realm_dir(realm_id)).await?;
        Ok(entities
            .into_iter()
            .filter(|e| e.realm_id() == realm_id)
            .collect())
    }

    async fn update(&self, entity: &E) -> StorageResult<()> {
        let dir = self.realm_dir(entity.realm_id());
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| from_io_error(e, &dir))?;

        let path = self.entity_path(entity.id(), entity.realm_id());
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(entity)
        } else {
            serde_json::to_vec(entity)
        }
        .map_err(|e| from_json_error(e, &path))?;

        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        fs::write(&tmp, bytes)
            .await
            .map_err(|e| from_io_error(e, &tmp))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| from_io_error(e, &path))?;

        tracing::trace!(
            kind = E::KIND,
            id = entity.id(),
            realm_id = entity.realm_id(),
            "entity written"
        );
        Ok(())
    }

    async fn exists(&self, id: &str, realm_id: &str) -> StorageResult<bool> {
        Ok(self.read(id, realm_id).await?.is_some())
    }

    async fn delete_by_id(&self, id: &str, realm_id: &str) -> StorageResult<()> {
        let path = self.entity_path(id, realm_id);
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::trace!(kind = E::KIND, id, realm_id, "entity deleted");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(from_io_error(err, &path)),
        }
    }

    async fn delete_by_realm_id(&self, realm_id: &str) -> StorageResult<()> {
        let dir = self.realm_dir(realm_id);
        match fs::remove_dir_all(&dir).await {
            Ok(()) => {
                tracing::debug!(kind = E::KIND, realm_id, "realm entities deleted");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(from_io_error(err, &dir)),
        }
    }
}

/// Never empty, so a blank realm or ID cannot alias the parent directory.
fn encode_segment(segment: &str) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(segment.as_bytes());
    if encoded.len() <= MAX_ENCODED_LEN {
        format!("b{encoded}")
    } else {
        format!("h{}", hex::encode(Sha256::digest(segment.as_bytes())))
    }
}
