//! Error types module
//!
//! All failures of the upload-and-addressing workflow are unified under
//! `ShareError`. Per-file errors (`RemoteWriteFailure`, `EncodingFailure`) are
//! reported in a batch outcome and never abort the batch; `MissingConfiguration`
//! stops a batch before any network call.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like missing user input
    Debug,
    /// Warning level - for per-file failures the batch recovers from
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Upload of {file} failed: {message}")]
    RemoteWriteFailure { file: String, message: String },

    #[error("Could not read {file}: {message}")]
    EncodingFailure { file: String, message: String },

    #[error("Persisted state '{key}' is corrupt: {message}")]
    CorruptPersistedState { key: String, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for workflow operations
pub type ShareResult<T> = Result<T, ShareError>;

impl ShareError {
    /// Machine-readable error code (e.g., "MISSING_CONFIGURATION")
    pub fn error_code(&self) -> &'static str {
        match self {
            ShareError::MissingConfiguration(_) => "MISSING_CONFIGURATION",
            ShareError::RemoteWriteFailure { .. } => "REMOTE_WRITE_FAILURE",
            ShareError::EncodingFailure { .. } => "ENCODING_FAILURE",
            ShareError::CorruptPersistedState { .. } => "CORRUPT_PERSISTED_STATE",
            ShareError::Storage(_) => "STORAGE_ERROR",
            ShareError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            ShareError::MissingConfiguration(_) | ShareError::InvalidInput(_) => LogLevel::Debug,
            ShareError::RemoteWriteFailure { .. } | ShareError::EncodingFailure { .. } => {
                LogLevel::Warn
            }
            ShareError::CorruptPersistedState { .. } | ShareError::Storage(_) => LogLevel::Error,
        }
    }

    /// Whether the error is scoped to a single file and leaves the batch running.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            ShareError::RemoteWriteFailure { .. } | ShareError::EncodingFailure { .. }
        )
    }

    /// Emit this error through `tracing` at its configured level.
    pub fn log(&self) {
        match self.log_level() {
            LogLevel::Debug => tracing::debug!(code = self.error_code(), error = %self, "Operation failed"),
            LogLevel::Warn => tracing::warn!(code = self.error_code(), error = %self, "Operation failed"),
            LogLevel::Error => tracing::error!(code = self.error_code(), error = %self, "Operation failed"),
        }
    }
}

impl From<io::Error> for ShareError {
    fn from(err: io::Error) -> Self {
        ShareError::Storage(format!("IO error: {}", err))
    }
}
