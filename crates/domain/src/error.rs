//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The variables payload is not valid JSON or is not a JSON object.
    #[error("invalid variables payload: {0}")]
    InvalidVariables(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A request target could not be split into its components.
    #[error("invalid request target: {0}")]
    InvalidTarget(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
