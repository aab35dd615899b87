//! API handlers
//!
//! Author: hephaex@gmail.com

pub mod health;
pub mod ner;

use crate::error::AppError;

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound
}
