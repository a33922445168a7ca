//! # anondocs-entity
//!
//! Domain entity models for AnonDocs. Stored entities (documents, share
//! link records) and the share snapshot value object all derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod document;
pub mod share;
