//! ghshare Services Library
//!
//! The upload-and-addressing workflow as callable services, decoupled from any
//! user interface:
//!
//! - [`ConfigStore`]: persisted user configuration (token, repository)
//! - [`HistoryLedger`]: persisted newest-first record of successful uploads
//! - [`UploadSession`]: application state (configuration snapshot, pending
//!   queue) and the sequential batch upload loop

pub mod config_store;
pub mod history;
pub mod upload;

pub use config_store::ConfigStore;
pub use history::HistoryLedger;
pub use upload::{
    BatchReport, FileOutcome, NoopProgress, ProgressReporter, UploadSession, UploadedFile,
};
