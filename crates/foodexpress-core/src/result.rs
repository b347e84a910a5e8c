//! Result alias used across all FoodExpress crates.

use crate::error::AppError;

/// Shorthand result type carrying [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
