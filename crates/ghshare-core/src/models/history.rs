//! Upload history entries.

use serde::{Deserialize, Serialize};

use crate::naming::StoredObjectName;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A completed upload, recorded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "name")]
    pub original_name: String,
    #[serde(rename = "fullName")]
    pub stored_object_name: StoredObjectName,
    /// Size in MiB with two decimals, e.g. `"0.25"`.
    #[serde(rename = "size")]
    pub size_mb: String,
    /// Unix milliseconds at which the entry was recorded.
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(
        original_name: impl Into<String>,
        stored_object_name: StoredObjectName,
        size_bytes: u64,
        timestamp: i64,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            stored_object_name,
            size_mb: format_size_mb(size_bytes),
            timestamp,
        }
    }

    /// Recording date formatted as `YYYY-MM-DD` (UTC).
    pub fn recorded_on(&self) -> Option<String> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
    }
}

/// Format a byte count as mebibytes with two decimals.
pub fn format_size_mb(size_bytes: u64) -> String {
    format!("{:.2}", size_bytes as f64 / BYTES_PER_MB)
}
