//! Upload session: application state plus the batch upload loop.
//!
//! The session owns a configuration snapshot (loaded once, refreshed only by
//! [`UploadSession::save_configuration`]) and the queue of pending files.
//! Batches run strictly sequentially; a failing file is reported and the loop
//! moves on to the next one. `upload_all` borrows the session mutably, so a
//! second batch cannot start while one is running.

use std::sync::Arc;

use chrono::Utc;
use ghshare_core::constants::{APP_NAME, PROGRESS_COMPLETE, PROGRESS_STARTED};
use ghshare_core::encoding::read_and_encode;
use ghshare_core::links::DownloadView;
use ghshare_core::{
    Configuration, HistoryEntry, LinkResolver, PendingFile, ShareError, ShareResult,
    StoredObjectName,
};
use ghshare_storage::{ObjectStore, StateStore, StorageError};
use uuid::Uuid;

use crate::config_store::ConfigStore;
use crate::history::HistoryLedger;

/// Receives progress for the file currently being uploaded.
///
/// Purely presentational: values are [`PROGRESS_STARTED`] right before the
/// remote write and [`PROGRESS_COMPLETE`] after it succeeded.
pub trait ProgressReporter: Send + Sync {
    fn on_progress(&self, file: &PendingFile, percent: u8);
}

/// Progress reporter that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn on_progress(&self, _file: &PendingFile, _percent: u8) {}
}

/// A file that reached the remote store and the ledger.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_id: Uuid,
    pub entry: HistoryEntry,
    pub remote_path: String,
    pub share_url: String,
    pub raw_url: String,
}

/// Result of one file in a batch.
#[derive(Debug)]
pub enum FileOutcome {
    Uploaded(UploadedFile),
    Failed {
        file_id: Uuid,
        file_name: String,
        error: ShareError,
        /// Set when the object was written remotely but a later step failed.
        remote_path: Option<String>,
    },
}

/// Per-file outcomes of a batch, in queue order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn uploaded(&self) -> impl Iterator<Item = &UploadedFile> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Uploaded(file) => Some(file),
            FileOutcome::Failed { .. } => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, FileOutcome::Failed { .. }))
            .count()
    }
}

struct FileFailure {
    error: ShareError,
    remote_path: Option<String>,
}

impl From<ShareError> for FileFailure {
    fn from(error: ShareError) -> Self {
        Self {
            error,
            remote_path: None,
        }
    }
}

/// Commit message recorded for an upload.
pub fn commit_message(original_name: &str) -> String {
    format!("Upload {} via {}", original_name, APP_NAME)
}

pub struct UploadSession {
    config: Configuration,
    config_store: ConfigStore,
    ledger: HistoryLedger,
    objects: Arc<dyn ObjectStore>,
    links: LinkResolver,
    queue: Vec<PendingFile>,
}

impl UploadSession {
    /// Open a session, loading the configuration snapshot from `state`.
    pub async fn open(
        state: Arc<dyn StateStore>,
        objects: Arc<dyn ObjectStore>,
        links: LinkResolver,
    ) -> ShareResult<Self> {
        let config_store = ConfigStore::new(state.clone());
        let config = config_store.load().await?;

        Ok(Self {
            config,
            config_store,
            ledger: HistoryLedger::new(state),
            objects,
            links,
            queue: Vec::new(),
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Persist new settings (trimmed) and refresh the snapshot.
    pub async fn save_configuration(
        &mut self,
        token: &str,
        repository: &str,
    ) -> ShareResult<&Configuration> {
        let config = Configuration::new(token, repository);
        self.config_store.save(&config).await?;
        self.config = config;
        Ok(&self.config)
    }

    pub fn links(&self) -> &LinkResolver {
        &self.links
    }

    /// Queue files; returns their ids in the order given.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = PendingFile>) -> Vec<Uuid> {
        let start = self.queue.len();
        self.queue.extend(files);
        self.queue[start..].iter().map(|file| file.id).collect()
    }

    /// Drop a queued file. Returns `false` if no file has that id.
    pub fn remove_file(&mut self, id: Uuid) -> bool {
        let before = self.queue.len();
        self.queue.retain(|file| file.id != id);
        self.queue.len() != before
    }

    pub fn queued(&self) -> &[PendingFile] {
        &self.queue
    }

    pub async fn history(&self) -> ShareResult<Vec<HistoryEntry>> {
        self.ledger.list().await
    }

    /// Download view for a stored object under the current configuration.
    pub fn download_view(&self, stored_name: &StoredObjectName) -> DownloadView {
        self.links
            .download_view(Some(self.config.repository.as_str()), stored_name)
    }

    /// Upload every queued file, one after another.
    ///
    /// Fails before any network call if the configuration is incomplete or the
    /// history cannot be read. Otherwise each file gets an outcome; uploaded
    /// files leave the queue, failed ones stay for a later batch.
    pub async fn upload_all(&mut self, progress: &dyn ProgressReporter) -> ShareResult<BatchReport> {
        self.config.ensure_complete()?;
        self.ledger.list().await?;

        let files = std::mem::take(&mut self.queue);
        let mut report = BatchReport {
            outcomes: Vec::with_capacity(files.len()),
        };

        tracing::info!(
            files = files.len(),
            repository = %self.config.repository,
            "Starting upload batch"
        );

        for file in files {
            match self.upload_one(&file, progress).await {
                Ok(uploaded) => report.outcomes.push(FileOutcome::Uploaded(uploaded)),
                Err(failure) => {
                    failure.error.log();
                    if failure.remote_path.is_none() {
                        self.queue.push(file.clone());
                    }
                    report.outcomes.push(FileOutcome::Failed {
                        file_id: file.id,
                        file_name: file.name.clone(),
                        error: failure.error,
                        remote_path: failure.remote_path,
                    });
                }
            }
        }

        tracing::info!(
            uploaded = report.outcomes.len() - report.failed_count(),
            failed = report.failed_count(),
            "Upload batch finished"
        );

        Ok(report)
    }

    async fn upload_one(
        &self,
        file: &PendingFile,
        progress: &dyn ProgressReporter,
    ) -> Result<UploadedFile, FileFailure> {
        let payload = read_and_encode(file).await?;
        let stored_name = StoredObjectName::derive_now(&file.name);

        progress.on_progress(file, PROGRESS_STARTED);

        let remote_path = self
            .objects
            .put_object(&self.config, &stored_name, &payload, &commit_message(&file.name))
            .await
            .map_err(|e| remote_write_failure(&file.name, e))?;

        progress.on_progress(file, PROGRESS_COMPLETE);

        let entry = HistoryEntry::new(
            file.name.clone(),
            stored_name.clone(),
            file.size,
            Utc::now().timestamp_millis(),
        );
        if let Err(error) = self.ledger.append(entry.clone()).await {
            return Err(FileFailure {
                error,
                remote_path: Some(remote_path),
            });
        }

        Ok(UploadedFile {
            file_id: file.id,
            share_url: self.links.share_url(&stored_name),
            raw_url: self
                .links
                .retrieval_url(&self.config.repository, &stored_name),
            remote_path,
            entry,
        })
    }
}

fn remote_write_failure(file_name: &str, err: StorageError) -> ShareError {
    let message = match err {
        StorageError::UploadFailed(message) => message,
        other => other.to_string(),
    };
    ShareError::RemoteWriteFailure {
        file: file_name.to_string(),
        message,
    }
}
