//! Domain models
//!
//! Persisted shapes keep the field names of the original browser state so a
//! state directory can be seeded from an exported `localStorage`.

pub mod configuration;
pub mod history;
pub mod pending_file;

pub use configuration::Configuration;
pub use history::{format_size_mb, HistoryEntry};
pub use pending_file::{FileSource, PendingFile};
