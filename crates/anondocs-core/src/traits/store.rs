//! Generic key-value store trait.
//!
//! The document store and the share link registry are both plain
//! key-value mappings owned by the application shell. Backends live in
//! `anondocs-storage`.

use std::fmt::Display;

use async_trait::async_trait;

use crate::result::AppResult;

/// A persistent mapping from keys to whole values.
///
/// Values are stored and returned by copy; callers never hold references
/// into the store.
#[async_trait]
pub trait KeyValueStore<K, V>: Send + Sync + std::fmt::Debug + 'static
where
    K: Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Get the value stored under `key`.
    async fn get(&self, key: &K) -> AppResult<Option<V>>;

    /// Insert or replace the value stored under `key`.
    async fn put(&self, key: &K, value: &V) -> AppResult<()>;

    /// Remove the value stored under `key`. Returns `true` if it existed.
    async fn delete(&self, key: &K) -> AppResult<bool>;

    /// Return every stored value, in no particular order.
    async fn list_all(&self) -> AppResult<Vec<V>>;
}
