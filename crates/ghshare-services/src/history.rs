//! Upload history ledger.
//!
//! Append-only, newest-first, unbounded: there is no cap, pagination,
//! deduplication or eviction.

use std::sync::Arc;

use ghshare_core::constants::HISTORY_STATE_KEY;
use ghshare_core::{HistoryEntry, ShareError, ShareResult};
use ghshare_storage::StateStore;

#[derive(Clone)]
pub struct HistoryLedger {
    state: Arc<dyn StateStore>,
}

impl HistoryLedger {
    pub fn new(state: Arc<dyn StateStore>) -> Self {
        Self { state }
    }

    /// Full history in stored (newest-first) order.
    pub async fn list(&self) -> ShareResult<Vec<HistoryEntry>> {
        let Some(raw) = self.state.get(HISTORY_STATE_KEY).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_str::<Option<Vec<HistoryEntry>>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(|e| ShareError::CorruptPersistedState {
                key: HISTORY_STATE_KEY.to_string(),
                message: e.to_string(),
            })
    }

    /// Insert `entry` at the front and write the whole sequence back.
    pub async fn append(&self, entry: HistoryEntry) -> ShareResult<()> {
        let mut entries = self.list().await?;
        entries.insert(0, entry);

        let raw = serde_json::to_string(&entries)
            .map_err(|e| ShareError::InvalidInput(format!("Serialize history: {}", e)))?;
        self.state.set(HISTORY_STATE_KEY, &raw).await?;

        tracing::debug!(entries = entries.len(), "History entry recorded");
        Ok(())
    }
}
