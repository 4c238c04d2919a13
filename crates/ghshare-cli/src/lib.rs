//! Shared helpers for the `ghshare` binary: tracing setup, progress output
//! and the printable shapes of upload outcomes and history.

use std::path::PathBuf;

use ghshare_core::{HistoryEntry, LinkResolver, PendingFile, ShareError};
use ghshare_services::{FileOutcome, ProgressReporter};
use serde::Serialize;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays parseable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Reports per-file progress through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn on_progress(&self, file: &PendingFile, percent: u8) {
        tracing::info!(file = %file.name, percent, "Upload progress");
    }
}

/// Printable result of one file in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeSummary {
    Uploaded {
        file: String,
        stored_name: String,
        size_mb: String,
        share_url: String,
        raw_url: String,
    },
    Failed {
        file: String,
        code: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        remote_path: Option<String>,
    },
}

impl From<&FileOutcome> for OutcomeSummary {
    fn from(outcome: &FileOutcome) -> Self {
        match outcome {
            FileOutcome::Uploaded(uploaded) => OutcomeSummary::Uploaded {
                file: uploaded.entry.original_name.clone(),
                stored_name: uploaded.entry.stored_object_name.to_string(),
                size_mb: uploaded.entry.size_mb.clone(),
                share_url: uploaded.share_url.clone(),
                raw_url: uploaded.raw_url.clone(),
            },
            FileOutcome::Failed {
                file_name,
                error,
                remote_path,
                ..
            } => OutcomeSummary::Failed {
                file: file_name.clone(),
                code: error.error_code().to_string(),
                message: error.to_string(),
                remote_path: remote_path.clone(),
            },
        }
    }
}

impl OutcomeSummary {
    /// A file that never made it into the queue.
    pub fn rejected(file: impl Into<String>, error: &ShareError) -> Self {
        OutcomeSummary::Failed {
            file: file.into(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            remote_path: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, OutcomeSummary::Failed { .. })
    }
}

/// Files that could be queued, plus a failed outcome for each path that could not.
pub async fn queue_paths(paths: &[PathBuf]) -> (Vec<PendingFile>, Vec<OutcomeSummary>) {
    let mut pending = Vec::with_capacity(paths.len());
    let mut rejected = Vec::new();

    for path in paths {
        match PendingFile::from_path(path).await {
            Ok(file) => pending.push(file),
            Err(error) => {
                error.log();
                rejected.push(OutcomeSummary::rejected(path.display().to_string(), &error));
            }
        }
    }

    (pending, rejected)
}

/// Log the batch totals; failures are raised to `warn`. Returns `(uploaded, failed)`.
pub fn log_batch_summary(summaries: &[OutcomeSummary]) -> (usize, usize) {
    let failed = summaries.iter().filter(|s| s.is_failed()).count();
    let uploaded = summaries.len() - failed;

    if failed > 0 {
        tracing::warn!(uploaded, failed, "Some files were not uploaded");
    } else {
        tracing::info!(uploaded, "All files processed");
    }
    (uploaded, failed)
}

/// One history row with its links resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub name: String,
    pub stored_name: String,
    pub size_mb: String,
    pub date: String,
    pub share_url: String,
}

impl HistoryRow {
    pub fn new(entry: &HistoryEntry, links: &LinkResolver) -> Self {
        Self {
            name: entry.original_name.clone(),
            stored_name: entry.stored_object_name.to_string(),
            size_mb: entry.size_mb.clone(),
            date: entry.recorded_on().unwrap_or_else(|| "-".to_string()),
            share_url: links.share_url(&entry.stored_object_name),
        }
    }
}

/// Render history rows as a fixed-width table.
pub fn render_history_table(rows: &[HistoryRow]) -> String {
    if rows.is_empty() {
        return "No uploads yet.\n".to_string();
    }

    let mut out = format!(
        "{:<30} {:>10} {:<10}  {}\n",
        "Name", "Size (MB)", "Date", "Share URL"
    );
    out.push_str(&"-".repeat(100));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:<30} {:>10} {:<10}  {}\n",
            truncate_string(&row.name, 30),
            row.size_mb,
            row.date,
            row.share_url
        ));
    }
    out.push_str(&format!("\n{} upload(s)\n", rows.len()));
    out
}
