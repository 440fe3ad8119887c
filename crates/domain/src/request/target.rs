//! Request target
//!
//! The URL of a templated request, kept as raw component strings. A template
//! such as `http://{host}/todos` is not a valid URL until its placeholders are
//! substituted, so components are only parsed into a [`Url`] afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Raw URL components of a templated request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTarget {
    /// URL scheme, e.g. `http`.
    pub scheme: String,
    /// Host, optionally with `:port`.
    pub host: String,
    /// Path, starting with `/` when non-empty.
    pub path: String,
    /// Query string without the leading `?`, still percent-encoded.
    #[serde(default)]
    pub raw_query: String,
    /// Fragment without the leading `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

impl RequestTarget {
    /// Creates a target from scheme, host and path.
    #[must_use]
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
            raw_query: String::new(),
            fragment: None,
        }
    }

    /// Sets the raw query string.
    #[must_use]
    pub fn with_query(mut self, raw_query: impl Into<String>) -> Self {
        self.raw_query = raw_query.into();
        self
    }

    /// Splits a (possibly templated) URL string into its components.
    ///
    /// No validation beyond the split is done; `{` and `}` are accepted anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTarget`] if the input has no `scheme://` prefix.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let Some((scheme, rest)) = raw.split_once("://") else {
            return Err(DomainError::InvalidTarget(format!("missing scheme in '{raw}'")));
        };
        if scheme.is_empty() {
            return Err(DomainError::InvalidTarget(format!("empty scheme in '{raw}'")));
        }

        let (rest, fragment) = match rest.split_once('#') {
            Some((before, fragment)) => (before, Some(fragment.to_string())),
            None => (rest, None),
        };
        let (rest, raw_query) = rest.split_once('?').unwrap_or((rest, ""));
        let (host, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };

        Ok(Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            path: path.to_string(),
            raw_query: raw_query.to_string(),
            fragment,
        })
    }

    /// Parses the assembled components into a [`Url`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the components do not form a
    /// valid URL, e.g. because the host contains whitespace.
    pub fn to_url(&self) -> DomainResult<Url> {
        let raw = self.to_string();
        Url::parse(&raw).map_err(|e| DomainError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Returns the request URI as sent on the request line: path plus query.
    #[must_use]
    pub fn request_uri(&self) -> String {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        if self.raw_query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.raw_query)
        }
    }
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)?;
        if !self.raw_query.is_empty() {
            write!(f, "?{}", self.raw_query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
