//! Share link management.

pub mod service;

pub use service::{LinkSummary, ShareService};
