//! Application error types

use std::io;

use bearcub_domain::DomainError;
use thiserror::Error;

use crate::use_cases::RequestField;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The variables payload could not be decoded into a JSON object.
    #[error("variables decode error: {0}")]
    VariablesDecode(#[source] DomainError),

    /// Reading the request body failed.
    #[error("failed to read request body: {0}")]
    BodyRead(#[from] io::Error),

    /// A placeholder in a request field was never closed.
    #[error("malformed placeholder in {field} at byte {offset}")]
    MalformedToken {
        /// The request field being rewritten.
        field: RequestField,
        /// Byte offset of the opening `{` within the field.
        offset: usize,
    },
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
