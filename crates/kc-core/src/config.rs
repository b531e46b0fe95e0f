//! Configuration for the file-backed store.
//!
//! Configuration is loaded from environment variables with sensible defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming the store root directory.
pub const ENV_ROOT_DIR: &str = "KC_FILESTORE_DIR";

/// Environment variable toggling pretty-printed JSON documents.
pub const ENV_PRETTY_JSON: &str = "KC_FILESTORE_PRETTY";

/// File store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// Directory all entity documents live under.
    pub root_dir: PathBuf,
    /// Whether documents are written pretty-printed.
    pub pretty_json: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./data"),
            pretty_json: true,
        }
    }
}

impl FileStoreConfig {
    /// Creates a configuration rooted at the given directory.
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Default::default()
        }
    }

    /// Sets whether documents are pretty-printed.
    #[must_use]
    pub const fn pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured if present.
    ///
    /// ## Errors
    ///
    /// Returns `Error::Config` if `KC_FILESTORE_PRETTY` is not a boolean.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let root_dir = lookup(ENV_ROOT_DIR)
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.root_dir, PathBuf::from);

        let pretty_json = match lookup(ENV_PRETTY_JSON) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                Error::Config(format!("{ENV_PRETTY_JSON} must be true or false, got '{raw}'"))
            })?,
            None => defaults.pretty_json,
        };

        Ok(Self {
            root_dir,
            pretty_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_env() {
        let config = FileStoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FileStoreConfig::default());
    }

    #[test]
    fn env_overrides_defaults() {
        let config = FileStoreConfig::from_lookup(lookup(&[
            (ENV_ROOT_DIR, "/var/lib/keycloak"),
            (ENV_PRETTY_JSON, "false"),
        ]))
        .unwrap();

        assert_eq!(config.root_dir, PathBuf::from("/var/lib/keycloak"));
        assert!(!config.pretty_json);
    }

    #[test]
    fn invalid_bool_is_config_error() {
        let err = FileStoreConfig::from_lookup(lookup(&[(ENV_PRETTY_JSON, "yes please")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn builder_sets_fields() {
        let config = FileStoreConfig::new("/tmp/store").pretty_json(false);
        assert_eq!(config.root_dir, PathBuf::from("/tmp/store"));
        assert!(!config.pretty_json);
    }
}
