//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The provider does not know the searched city
    #[error("City not found: {0}")]
    NotFound(String),

    /// External service error (network, HTTP status, provider outage)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The provider answered with something we cannot read
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    ///
    /// Nothing retries automatically; this only feeds the failure log so a
    /// user knows whether resubmitting the search can help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::RateLimited | ApplicationError::ExternalService(_)
        )
    }
}
