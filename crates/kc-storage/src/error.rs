//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound {
        /// Type of entity (e.g., "Group", "ClientScope").
        entity_type: &'static str,
        /// Entity ID.
        id: String,
    },

    /// Duplicate entity (unique constraint violation).
    #[error("Duplicate {entity_type}: {field} '{value}' already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Field that caused the conflict.
        field: &'static str,
        /// Conflicting value.
        value: String,
    },

    /// A required argument was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A parent chain loops back on itself.
    #[error("Hierarchy cycle: {entity_type} '{id}' is its own ancestor")]
    HierarchyCycle {
        /// Type of entity.
        entity_type: &'static str,
        /// First entity seen twice while walking the chain.
        id: String,
    },

    /// Underlying I/O failure.
    #[error("Storage I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    /// Creates a not found error for an entity.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(
        entity_type: &'static str,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::Duplicate {
            entity_type,
            field,
            value: value.into(),
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates a hierarchy cycle error.
    #[must_use]
    pub fn cycle(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::HierarchyCycle {
            entity_type,
            id: id.into(),
        }
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a duplicate error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Checks if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error() {
        let err = StorageError::not_found("Group", "nomads");

        assert!(err.is_not_found());
        assert!(!err.is_duplicate());
        assert!(err.to_string().contains("nomads"));
    }

    #[test]
    fn duplicate_error() {
        let err = StorageError::duplicate("ClientScope", "name", "Gobi");

        assert!(err.is_duplicate());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("Gobi"));
    }

    #[test]
    fn invalid_argument_error() {
        let err = StorageError::invalid_argument("name cannot be null");

        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Invalid argument: name cannot be null");
    }

    #[test]
    fn cycle_error_names_entity() {
        let err = StorageError::cycle("Group", "loop");
        assert!(err.to_string().contains("'loop'"));
    }
}
