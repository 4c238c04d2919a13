//! Storage abstraction traits
//!
//! This module defines the traits every state and object backend implements.

use async_trait::async_trait;
use ghshare_core::{Configuration, ShareError, StoredObjectName};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for ShareError {
    fn from(err: StorageError) -> Self {
        ShareError::Storage(err.to_string())
    }
}

/// Persisted key-value state.
///
/// Values are opaque text; callers own the schema of what they store.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was ever written.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Remote object store that uploads are written to.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create `stored_name` in the configured repository from a base64 payload.
    ///
    /// One attempt, no retry. On failure the error carries the remote's own
    /// message where it provided one. Returns the remote path of the object.
    async fn put_object(
        &self,
        credentials: &Configuration,
        stored_name: &StoredObjectName,
        payload: &str,
        message: &str,
    ) -> StorageResult<String>;
}

/// Validate a state key: non-empty, `[A-Za-z0-9_-]` only.
pub(crate) fn validate_state_key(key: &str) -> StorageResult<()> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(StorageError::InvalidKey(format!(
            "State key '{}' contains invalid characters",
            key
        )));
    }
    Ok(())
}
