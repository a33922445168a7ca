//! # anondocs-storage
//!
//! Backends for the [`KeyValueStore`] trait: an in-memory map for tests
//! and throwaway sessions, and a JSON file per store for the CLI. The
//! document store and the share link registry are both built from these.
//!
//! [`KeyValueStore`]: anondocs_core::traits::KeyValueStore

pub mod file;
pub mod memory;
pub mod stores;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use stores::{DocumentStore, LinkRegistry, Stores};
