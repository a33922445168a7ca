//! Document management.

pub mod export;
pub mod markup;
pub mod service;

pub use service::DocumentService;
