//! Result alias shared by every TTMS crate.

use crate::error::AppError;

/// `Result` specialized to [`AppError`], the error type at crate boundaries.
pub type AppResult<T> = Result<T, AppError>;
