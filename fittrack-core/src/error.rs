//! Error types shared by the storage layer and the stores.

use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors raised by a key-value backend or while (de)serializing a stored value.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse stored value for key '{key}': {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by store operations that mutate state.
///
/// A store never changes its in-memory state when one of these is returned.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("No workout in progress. Start one with a plan first.")]
    NoActiveWorkout,

    #[error("Not signed in")]
    NotAuthenticated,
}

impl StoreError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("Workout plan", "42");
        assert_eq!(err.to_string(), "Workout plan not found: 42");
    }

    #[test]
    fn test_storage_error_converts() {
        let err: StoreError = StorageError::Backend("disk full".into()).into();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
