//! In-memory key-value store backed by `dashmap`.

use std::fmt::{Debug, Display};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use anondocs_core::result::AppResult;
use anondocs_core::traits::KeyValueStore;

/// In-memory store. Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct MemoryStore<V> {
    /// Values keyed by the key's display form.
    entries: Arc<DashMap<String, V>>,
}

impl<V> MemoryStore<V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> KeyValueStore<K, V> for MemoryStore<V>
where
    K: Display + Send + Sync + 'static,
    V: Clone + Debug + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> AppResult<Option<V>> {
        Ok(self
            .entries
            .get(&key.to_string())
            .map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &K, value: &V) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &K) -> AppResult<bool> {
        Ok(self.entries.remove(&key.to_string()).is_some())
    }

    async fn list_all(&self) -> AppResult<Vec<V>> {
        Ok(self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
