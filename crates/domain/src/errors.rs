//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Empty or whitespace-only city search
    #[error("Invalid city: {0:?}")]
    InvalidCity(String),

    /// Unknown unit system name
    #[error("Invalid units: {0}")]
    InvalidUnits(String),

    /// Unknown IANA timezone name
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
