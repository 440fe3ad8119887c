//! Bearcub Application - Placeholder substitution
//!
//! This crate defines the substitution engine with:
//! - Key resolvers (no-op, JSON dictionary, plain functions)
//! - The single-pass `{placeholder}` rewriter
//! - The request substitution use case
//! - Application-level error handling

pub mod error;
pub mod use_cases;
pub mod variable_resolver;

use bearcub_domain::TemplatedRequest;

pub use error::{ApplicationError, ApplicationResult};
pub use use_cases::{FieldReport, RequestField, SubstituteRequest, SubstitutionReport};
pub use variable_resolver::{
    DictionaryResolver, KeyResolver, NoopResolver, PayloadResolver, Resolution, RewriteResult,
    Rewriter, ScanError, rewrite,
};

/// Substitutes placeholders in `request` with default settings.
///
/// # Errors
///
/// See [`SubstituteRequest::execute`].
pub fn substitute_request(
    request: &mut TemplatedRequest,
    variables: impl AsRef<[u8]>,
) -> ApplicationResult<SubstitutionReport> {
    SubstituteRequest::default().execute(request, variables)
}
