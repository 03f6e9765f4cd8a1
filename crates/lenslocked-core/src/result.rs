//! Convenience result type alias for Lenslocked.

use crate::error::AppError;

/// A specialized `Result` type for Lenslocked operations.
pub type AppResult<T> = Result<T, AppError>;
