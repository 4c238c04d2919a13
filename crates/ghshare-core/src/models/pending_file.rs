//! Files queued for upload.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use uuid::Uuid;

use crate::error::{ShareError, ShareResult};

/// Where a pending file's bytes come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Bytes),
}

/// A file selected for upload. Lives only in the session queue.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    pub source: FileSource,
}

impl PendingFile {
    /// Queue a file from disk. The display name is the final path component.
    pub async fn from_path(path: impl AsRef<Path>) -> ShareResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ShareError::InvalidInput(format!("Not a file name: {}", path.display()))
            })?
            .to_string();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ShareError::EncodingFailure {
                file: name.clone(),
                message: e.to_string(),
            })?;
        if !metadata.is_file() {
            return Err(ShareError::InvalidInput(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Queue an in-memory blob under the given name.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size: data.len() as u64,
            source: FileSource::Bytes(data),
        }
    }
}
