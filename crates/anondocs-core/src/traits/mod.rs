//! Collaborator traits implemented by other crates.

pub mod store;

pub use store::KeyValueStore;
