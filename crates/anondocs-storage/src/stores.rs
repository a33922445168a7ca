//! The document store and link registry, built from configuration.

use std::sync::Arc;

use tracing::info;

use anondocs_core::config::{StorageBackend, StorageConfig};
use anondocs_core::result::AppResult;
use anondocs_core::traits::KeyValueStore;
use anondocs_core::types::{DocumentId, LinkId};
use anondocs_entity::document::Document;
use anondocs_entity::share::LinkRecord;

use crate::file::JsonFileStore;
use crate::memory::MemoryStore;

/// Shared handle to the document store.
pub type DocumentStore = Arc<dyn KeyValueStore<DocumentId, Document>>;

/// Shared handle to the share link registry.
pub type LinkRegistry = Arc<dyn KeyValueStore<LinkId, LinkRecord>>;

/// Both stores owned by the application shell.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Documents keyed by id.
    pub documents: DocumentStore,
    /// Share link records keyed by id.
    pub links: LinkRegistry,
}

impl Stores {
    /// Opens the configured backend.
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        let stores = match config.backend {
            StorageBackend::Memory => Self::in_memory(),
            StorageBackend::File => {
                let documents = JsonFileStore::<Document>::open(config.documents_path()).await?;
                let links = JsonFileStore::<LinkRecord>::open(config.links_path()).await?;
                Self {
                    documents: Arc::new(documents),
                    links: Arc::new(links),
                }
            }
        };

        info!(backend = ?config.backend, data_dir = %config.data_dir, "Stores opened");
        Ok(stores)
    }

    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            documents: Arc::new(MemoryStore::<Document>::new()),
            links: Arc::new(MemoryStore::<LinkRecord>::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn test_file_backend_writes_under_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = StorageConfig {
            data_dir: dir.path().to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };

        let stores = Stores::open(&config).await.expect("open");
        let doc = Document::new("Notes");
        stores.documents.put(&doc.id, &doc).await.expect("put");

        let link = LinkRecord {
            id: LinkId::new(),
            url: "http://localhost:8080/?shared=PUB%3A".into(),
            is_public: true,
            created_at: Utc::now(),
            expires_at: None,
            source_doc_id: Some(doc.id),
        };
        stores.links.put(&link.id, &link).await.expect("put");

        assert!(config.documents_path().exists());
        assert!(config.links_path().exists());

        let reopened = Stores::open(&config).await.expect("reopen");
        assert_eq!(reopened.documents.get(&doc.id).await.expect("get"), Some(doc));
        assert_eq!(reopened.links.get(&link.id).await.expect("get"), Some(link));
    }

    #[tokio::test]
    async fn test_memory_backend_starts_empty() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let stores = Stores::open(&config).await.expect("open");
        assert!(stores.documents.list_all().await.expect("list").is_empty());
        assert!(stores.links.list_all().await.expect("list").is_empty());
    }
}
