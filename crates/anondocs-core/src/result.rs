//! Convenience result type alias for AnonDocs.

use crate::error::AppError;

/// A specialized `Result` type for AnonDocs operations.
pub type AppResult<T> = Result<T, AppError>;
