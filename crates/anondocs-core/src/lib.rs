//! # anondocs-core
//!
//! Core crate for AnonDocs. Contains configuration schemas, typed
//! identifiers, the generic key-value store trait, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other AnonDocs crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
