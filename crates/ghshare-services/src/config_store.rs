//! Persisted user configuration.

use std::sync::Arc;

use ghshare_core::constants::CONFIG_STATE_KEY;
use ghshare_core::{Configuration, ShareError, ShareResult};
use ghshare_storage::StateStore;

/// Reads and writes the [`Configuration`] document.
#[derive(Clone)]
pub struct ConfigStore {
    state: Arc<dyn StateStore>,
}

impl ConfigStore {
    pub fn new(state: Arc<dyn StateStore>) -> Self {
        Self { state }
    }

    /// Load the saved configuration; an absent (or `null`) document is the empty configuration.
    pub async fn load(&self) -> ShareResult<Configuration> {
        let Some(raw) = self.state.get(CONFIG_STATE_KEY).await? else {
            return Ok(Configuration::default());
        };

        serde_json::from_str::<Option<Configuration>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(|e| ShareError::CorruptPersistedState {
                key: CONFIG_STATE_KEY.to_string(),
                message: e.to_string(),
            })
    }

    pub async fn save(&self, config: &Configuration) -> ShareResult<()> {
        let raw = serde_json::to_string(config)
            .map_err(|e| ShareError::InvalidInput(format!("Serialize configuration: {}", e)))?;
        self.state.set(CONFIG_STATE_KEY, &raw).await?;

        tracing::info!(repository = %config.repository, "Configuration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghshare_storage::MemoryStateStore;

    #[tokio::test]
    async fn absent_configuration_is_empty() {
        let store = ConfigStore::new(Arc::new(MemoryStateStore::new()));
        let config = store.load().await.unwrap();
        assert_eq!(config, Configuration::default());
        assert!(!config.is_complete());
    }

    #[tokio::test]
    async fn null_document_is_empty() {
        let store = ConfigStore::new(Arc::new(MemoryStateStore::with_value(
            CONFIG_STATE_KEY,
            "null",
        )));
        assert_eq!(store.load().await.unwrap(), Configuration::default());
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = ConfigStore::new(Arc::new(MemoryStateStore::new()));
        let config = Configuration::new("ghp_abc", "alice/files");
        store.save(&config).await.unwrap();
        assert_eq!(store.load().await.unwrap(), config);
    }

    #[tokio::test]
    async fn reads_browser_exported_document() {
        let store = ConfigStore::new(Arc::new(MemoryStateStore::with_value(
            CONFIG_STATE_KEY,
            r#"{"token":"ghp_abc","repo":"alice/files"}"#,
        )));
        let config = store.load().await.unwrap();
        assert_eq!(config.repository, "alice/files");
    }

    #[tokio::test]
    async fn wrong_shape_is_corrupt_state() {
        let store = ConfigStore::new(Arc::new(MemoryStateStore::with_value(
            CONFIG_STATE_KEY,
            r#"{"token": 42}"#,
        )));
        let err = store.load().await.unwrap_err();
        match err {
            ShareError::CorruptPersistedState { key, .. } => assert_eq!(key, "gh_config"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
