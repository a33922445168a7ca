//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Settings for building share URLs and protecting private envelopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Origin and path that share URLs are built on.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Query parameter carrying the envelope.
    #[serde(default = "default_param_name")]
    pub param_name: String,
    /// Expiry applied when the caller does not choose one (0 = never).
    #[serde(default = "default_expiry_days")]
    pub default_expiry_days: u32,
    /// Argon2id memory cost in KiB.
    #[serde(default = "default_kdf_memory_kib")]
    pub kdf_memory_kib: u32,
    /// Argon2id iteration count.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
    /// Argon2id lane count.
    #[serde(default = "default_kdf_parallelism")]
    pub kdf_parallelism: u32,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            param_name: default_param_name(),
            default_expiry_days: default_expiry_days(),
            kdf_memory_kib: default_kdf_memory_kib(),
            kdf_iterations: default_kdf_iterations(),
            kdf_parallelism: default_kdf_parallelism(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/".to_string()
}

fn default_param_name() -> String {
    "shared".to_string()
}

fn default_expiry_days() -> u32 {
    7
}

fn default_kdf_memory_kib() -> u32 {
    19 * 1024
}

fn default_kdf_iterations() -> u32 {
    2
}

fn default_kdf_parallelism() -> u32 {
    1
}
