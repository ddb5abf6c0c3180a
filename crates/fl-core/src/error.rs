//! # AppError
//!
//! Centralized error handling for the Flameboard ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all fl-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Flame, Generation)
    #[error("{0} not found with id {1}")]
    NotFound(&'static str, i64),

    /// Validation failure (e.g., content too short, rating out of range)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The external AI call failed; surfaced as a descriptive message,
    /// never retried by the store
    #[error("generation failed: {0}")]
    UpstreamGenerationFailure(String),

    /// Infrastructure failure (e.g., upstream transport error)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn flame_not_found(id: i64) -> Self {
        AppError::NotFound("flame", id)
    }

    pub fn generation_not_found(id: i64) -> Self {
        AppError::NotFound("generation", id)
    }
}

/// A specialized Result type for Flameboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
