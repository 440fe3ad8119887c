//! Templated request types

mod body;
mod header;
mod target;

pub use body::RequestBody;
pub use header::{RequestHeader, RequestHeaders};
pub use target::RequestTarget;

use crate::error::DomainResult;

/// An outbound request whose host, path, query and body may contain
/// `{placeholder}` tokens.
#[derive(Debug)]
pub struct TemplatedRequest {
    /// Request method, sent verbatim.
    pub method: String,
    /// Raw URL components.
    pub target: RequestTarget,
    /// Host label sent instead of `target.host` when set.
    ///
    /// Substitution always clears it so that the rewritten host is used.
    pub host_override: Option<String>,
    /// Request headers, sent verbatim.
    pub headers: RequestHeaders,
    /// Optional body.
    pub body: Option<RequestBody>,
}

impl TemplatedRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: impl Into<String>, target: RequestTarget) -> Self {
        Self {
            method: method.into(),
            target,
            host_override: None,
            headers: RequestHeaders::new(),
            body: None,
        }
    }

    /// Creates a request from a method and a (possibly templated) URL string.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be split into components.
    pub fn parse(method: impl Into<String>, url: &str) -> DomainResult<Self> {
        Ok(Self::new(method, RequestTarget::parse(url)?))
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(RequestHeader::new(name, value));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the host override.
    #[must_use]
    pub fn with_host_override(mut self, host: impl Into<String>) -> Self {
        self.host_override = Some(host.into());
        self
    }

    /// Returns the host that will be sent in the `Host` header.
    #[must_use]
    pub fn effective_host(&self) -> &str {
        self.host_override.as_deref().unwrap_or(&self.target.host)
    }
}
