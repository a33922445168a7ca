//! # anondocs-service
//!
//! Application services for AnonDocs. Each service works on the stores it
//! is given at construction time; nothing here holds global state.
//!
//! - [`DocumentService`]: document CRUD, markup cleanup, stats, find, and
//!   printable export
//! - [`ShareService`]: creating, listing, converting, revoking, and
//!   opening share links

pub mod document;
pub mod share;

pub use document::DocumentService;
pub use share::{LinkSummary, ShareService};
