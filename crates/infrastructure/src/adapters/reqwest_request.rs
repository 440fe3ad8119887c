//! Conversion of templated requests into `reqwest` requests.
//!
//! A templated request is only a valid HTTP request once its placeholders are
//! substituted, so the conversion runs after [`SubstituteRequest`].

use bearcub_application::{ApplicationError, SubstituteRequest, SubstitutionReport};
use bearcub_domain::{DomainError, SubstitutionSettings, TemplatedRequest};
use reqwest::header::{HOST, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Body, Method, Request};

/// Errors raised while preparing a `reqwest` request.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Placeholder substitution failed.
    #[error("substitution failed: {0}")]
    Substitution(#[from] ApplicationError),

    /// The method is not a valid HTTP method token.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The substituted target is not a valid URL.
    #[error(transparent)]
    InvalidUrl(#[from] DomainError),

    /// A header name or value is not valid.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Reading a reader body failed.
    #[error("failed to read request body: {0}")]
    Body(#[from] std::io::Error),
}

/// Converts an already substituted request into a `reqwest::Request`.
///
/// The host override, if still set, is sent as the `Host` header. Reader
/// bodies are read fully.
///
/// # Errors
///
/// Returns an error if the method, URL or a header is invalid, or if a reader
/// body cannot be read.
pub fn into_reqwest(request: TemplatedRequest) -> Result<Request, ConversionError> {
    let method = Method::from_bytes(request.method.as_bytes())
        .map_err(|_| ConversionError::InvalidMethod(request.method.clone()))?;
    let url = request.target.to_url()?;

    let mut headers = HeaderMap::with_capacity(request.headers.len() + 1);
    for header in request.headers.iter() {
        let name = HeaderName::from_bytes(header.name.as_bytes())
            .map_err(|_| ConversionError::InvalidHeader(header.name.clone()))?;
        let value = HeaderValue::from_str(&header.value)
            .map_err(|_| ConversionError::InvalidHeader(format!("{}: {}", header.name, header.value)))?;
        headers.append(name, value);
    }
    if let Some(host) = &request.host_override {
        let value = HeaderValue::from_str(host)
            .map_err(|_| ConversionError::InvalidHeader(format!("Host: {host}")))?;
        headers.insert(HOST, value);
    }

    let mut out = Request::new(method, url);
    *out.headers_mut() = headers;
    if let Some(body) = request.body {
        *out.body_mut() = Some(Body::from(body.into_bytes()?));
    }
    Ok(out)
}

/// Substitutes placeholders and builds the outgoing `reqwest::Request`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestRequestPreparer {
    substitute: SubstituteRequest,
}

impl ReqwestRequestPreparer {
    /// Creates a preparer with the given substitution settings.
    #[must_use]
    pub const fn new(settings: SubstitutionSettings) -> Self {
        Self {
            substitute: SubstituteRequest::new(settings),
        }
    }

    /// Substitutes `variables` into `request` and converts the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Substitution`] if substitution fails, or
    /// any conversion error from [`into_reqwest`].
    pub fn prepare(
        &self,
        mut request: TemplatedRequest,
        variables: impl AsRef<[u8]>,
    ) -> Result<(Request, SubstitutionReport), ConversionError> {
        let report = self.substitute.execute(&mut request, variables)?;
        if !report.is_complete() {
            tracing::warn!(
                unresolved = ?report.unresolved_keys(),
                "sending request with unresolved placeholders"
            );
        }
        Ok((into_reqwest(request)?, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bearcub_domain::{RequestBody, RequestTarget};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn body_bytes(request: &Request) -> Option<&[u8]> {
        request.body().and_then(Body::as_bytes)
    }

    #[test]
    fn test_converts_substituted_request() {
        let request = TemplatedRequest::new(
            "POST",
            RequestTarget::new("http", "www.google.com", "/search").with_query("q=rust"),
        )
        .with_header("User-Agent", "Fake")
        .with_header("Accept", "text/html")
        .with_header("Accept", "application/json")
        .with_body("abcdef");

        let out = into_reqwest(request).unwrap();

        assert_eq!(out.method(), &Method::POST);
        assert_eq!(out.url().as_str(), "http://www.google.com/search?q=rust");
        assert_eq!(out.headers().get("user-agent").unwrap(), "Fake");
        assert_eq!(out.headers().get_all("accept").iter().count(), 2);
        assert!(out.headers().get(HOST).is_none());
        assert_eq!(body_bytes(&out), Some(&b"abcdef"[..]));
    }

    #[test]
    fn test_host_override_becomes_host_header() {
        let request = TemplatedRequest::new("GET", RequestTarget::new("http", "10.0.0.1", "/"))
            .with_host_override("www.techcrunch.com");
        let out = into_reqwest(request).unwrap();
        assert_eq!(out.headers().get(HOST).unwrap(), "www.techcrunch.com");
    }

    #[test]
    fn test_reader_body_is_buffered() {
        let request = TemplatedRequest::new("PUT", RequestTarget::new("http", "h", "/"))
            .with_body(RequestBody::reader(Cursor::new(b"data".to_vec())));
        let out = into_reqwest(request).unwrap();
        assert_eq!(body_bytes(&out), Some(&b"data"[..]));
    }

    #[test]
    fn test_unsubstituted_method_is_rejected() {
        let request = TemplatedRequest::new("{method}", RequestTarget::new("http", "h", "/"));
        let err = into_reqwest(request).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidMethod(m) if m == "{method}"));
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let request = TemplatedRequest::new("GET", RequestTarget::new("http", "h", "/"))
            .with_header("Bad Header", "x");
        assert!(matches!(
            into_reqwest(request),
            Err(ConversionError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_prepare_substitutes_query() {
        let request = TemplatedRequest::parse("GET", "http://todos.stoplight.io/todos?apikey={apikey}")
            .unwrap()
            .with_header("User-Agent", "Fake");

        let (out, report) = ReqwestRequestPreparer::default()
            .prepare(request, r#"{"apikey": 123}"#)
            .unwrap();

        assert_eq!(out.method(), &Method::GET);
        assert_eq!(out.url().query(), Some("apikey=123"));
        assert_eq!(out.headers().get("user-agent").unwrap(), "Fake");
        assert!(report.is_complete());
    }

    #[test]
    fn test_prepare_clears_host_override() {
        let request = TemplatedRequest::parse("GET", "http://{host}/")
            .unwrap()
            .with_host_override("www.techcrunch.com");

        let (out, _) = ReqwestRequestPreparer::default()
            .prepare(request, r#"{"host": "techcrunch.com"}"#)
            .unwrap();

        assert_eq!(out.url().host_str(), Some("techcrunch.com"));
        assert!(out.headers().get(HOST).is_none());
    }

    #[test]
    fn test_prepare_propagates_decode_error() {
        let request = TemplatedRequest::parse("GET", "http://{host}/").unwrap();
        let err = ReqwestRequestPreparer::default()
            .prepare(request, "not json")
            .unwrap_err();
        assert!(matches!(
            err,
            ConversionError::Substitution(ApplicationError::VariablesDecode(_))
        ));
    }
}
