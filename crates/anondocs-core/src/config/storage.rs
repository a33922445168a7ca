//! Document and link store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which key-value backend holds documents and share links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// JSON files under `data_dir`.
    File,
    /// Process memory only; nothing survives exit.
    Memory,
}

/// Store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend type.
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Directory for file-backed stores.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// File name of the document store.
    #[serde(default = "default_documents_file")]
    pub documents_file: String,
    /// File name of the link registry.
    #[serde(default = "default_links_file")]
    pub links_file: String,
}

impl StorageConfig {
    /// Full path of the document store file.
    pub fn documents_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.documents_file)
    }

    /// Full path of the link registry file.
    pub fn links_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.links_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
            documents_file: default_documents_file(),
            links_file: default_links_file(),
        }
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_documents_file() -> String {
    "documents.json".to_string()
}

fn default_links_file() -> String {
    "shared_links.json".to_string()
}
