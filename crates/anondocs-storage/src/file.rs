//! JSON-file key-value store.
//!
//! The whole map lives in one JSON object on disk and in memory. Every
//! write rewrites the file through a temporary sibling and a rename, so a
//! crash leaves either the old or the new contents.

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use anondocs_core::error::{AppError, ErrorKind};
use anondocs_core::result::AppResult;
use anondocs_core::traits::KeyValueStore;

/// A key-value store persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore<V> {
    /// Location of the JSON file.
    path: PathBuf,
    /// In-memory copy of the file contents.
    entries: Arc<RwLock<BTreeMap<String, V>>>,
}

impl<V> JsonFileStore<V>
where
    V: Serialize + DeserializeOwned,
{
    /// Opens the store at `path`, creating parent directories as needed.
    ///
    /// A missing or empty file is an empty store. A file that is not a JSON
    /// object of values is an error rather than being silently replaced.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create store directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let entries = match fs::read_to_string(&path).await {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Store file is not valid JSON: {}", path.display()),
                    e,
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read store file: {}", path.display()),
                    e,
                ));
            }
        };

        debug!(path = %path.display(), count = entries.len(), "Opened JSON store");

        Ok(Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, V>) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, &json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write store file: {}", tmp.display()),
                e,
            )
        })?;

        if let Err(e) = fs::rename(&tmp, &self.path).await {
            warn!(path = %self.path.display(), error = %e, "Failed to replace store file");
            let _ = fs::remove_file(&tmp).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace store file: {}", self.path.display()),
                e,
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl<K, V> KeyValueStore<K, V> for JsonFileStore<V>
where
    K: Display + Send + Sync + 'static,
    V: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> AppResult<Option<V>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&key.to_string()).cloned())
    }

    async fn put(&self, key: &K, value: &V) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let previous = entries.insert(key.to_string(), value.clone());

        if let Err(e) = self.persist(&entries).await {
            // Keep memory consistent with disk.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(&key.to_string()),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, key: &K) -> AppResult<bool> {
        let mut entries = self.entries.write().await;
        let Some(previous) = entries.remove(&key.to_string()) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&entries).await {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }

    async fn list_all(&self) -> AppResult<Vec<V>> {
        let entries = self.entries.read().await;
        Ok(entries.values().cloned().collect())
    }
}
