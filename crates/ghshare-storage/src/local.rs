use crate::traits::{validate_state_key, StateStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem state store: one JSON document per key.
#[derive(Clone, Debug)]
pub struct LocalStateStore {
    base_path: PathBuf,
}

impl LocalStateStore {
    /// Create a new LocalStateStore instance
    ///
    /// # Arguments
    /// * `base_path` - Directory holding the state documents (e.g., "~/.local/share/ghshare")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create state directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStateStore { base_path })
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_state_key(key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl StateStore for LocalStateStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_to_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::BackendError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let tmp_path = self.base_path.join(format!(".{}.json.tmp", key));
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&tmp_path).await.map_err(|e| {
            StorageError::BackendError(format!(
                "Failed to create file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        file.write_all(value.as_bytes()).await.map_err(|e| {
            StorageError::BackendError(format!(
                "Failed to write file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        file.sync_all().await?;
        drop(file);

        // atomic within one directory
        fs::rename(&tmp_path, &path).await?;

        tracing::debug!(
            path = %path.display(),
            key = %key,
            size_bytes = value.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "State written"
        );

        Ok(())
    }
}
