use crate::{GitHubStorage, LocalStateStore, ObjectStore, StateStore, StorageError, StorageResult};
use ghshare_api_client::ApiClient;
use ghshare_core::Settings;
use std::sync::Arc;

/// Create the persisted state store in the configured state directory
pub async fn create_state_store(settings: &Settings) -> StorageResult<Arc<dyn StateStore>> {
    let store = LocalStateStore::new(settings.state_dir.clone()).await?;
    Ok(Arc::new(store))
}

/// Create the remote object store for the configured API endpoint
pub fn create_object_store(settings: &Settings) -> StorageResult<Arc<dyn ObjectStore>> {
    let client = ApiClient::from_settings(settings)
        .map_err(|e| StorageError::ConfigError(e.to_string()))?;
    Ok(Arc::new(GitHubStorage::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn state_store_lives_in_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            api_url: "https://api.github.com".to_string(),
            state_dir: dir.path().join("state"),
            share_origin: "http://localhost:8080".to_string(),
            share_path: "/".to_string(),
            http_timeout_secs: None,
        };

        let store = create_state_store(&settings).await.unwrap();
        store.set("gh_config", "{}").await.unwrap();
        assert!(dir.path().join("state").join("gh_config.json").exists());

        assert!(create_object_store(&settings).is_ok());
    }
}
