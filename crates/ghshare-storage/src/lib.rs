//! ghshare Storage Library
//!
//! Storage abstractions and their implementations:
//!
//! - [`StateStore`]: the small persisted key-value store holding the user
//!   configuration and upload history (`local` on disk, `memory` for tests).
//! - [`ObjectStore`]: the remote store uploads are written to (`github`).
//!
//! # State key format
//!
//! State keys are plain identifiers (`[A-Za-z0-9_-]+`). The local backend keeps
//! one JSON document per key at `{state_dir}/{key}.json`.

pub mod factory;
pub mod github;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_object_store, create_state_store};
pub use github::GitHubStorage;
pub use local::LocalStateStore;
pub use memory::MemoryStateStore;
pub use traits::{ObjectStore, StateStore, StorageError, StorageResult};
