//! ghshare Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! pure parts of the upload-and-addressing workflow (encoding, stored object
//! naming, share link resolution) shared by every ghshare component.

pub mod config;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod links;
pub mod models;
pub mod naming;

// Re-export commonly used types
pub use config::Settings;
pub use error::{LogLevel, ShareError, ShareResult};
pub use links::{DownloadView, LinkResolver, Route};
pub use models::{Configuration, FileSource, HistoryEntry, PendingFile};
pub use naming::StoredObjectName;
