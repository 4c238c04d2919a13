use crate::traits::{validate_state_key, StateStore, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory state store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. to simulate state left by another client.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_state_key(key)?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_state_key(key)?;
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_value_is_readable() {
        let store = MemoryStateStore::with_value("upload_history", "[]");
        assert_eq!(store.get("upload_history").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("gh_config").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = MemoryStateStore::new();
        store.set("k", "1").await.unwrap();
        store.set("k", "2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("2"));
    }
}
