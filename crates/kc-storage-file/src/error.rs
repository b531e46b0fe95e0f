//! File storage error conversions.

use std::path::Path;

use kc_storage::StorageError;

/// Converts an I/O error on `path` to a storage error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_io_error(err: std::io::Error, path: &Path) -> StorageError {
    StorageError::Io(format!("{}: {err}", path.display()))
}

/// Converts a JSON error for the document at `path` to a storage error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_json_error(err: serde_json::Error, path: &Path) -> StorageError {
    StorageError::Serialization(format!("{}: {err}", path.display()))
}
