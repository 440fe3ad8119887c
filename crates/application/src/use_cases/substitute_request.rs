//! Substitute request use case.

use std::fmt;

use bearcub_domain::{RequestBody, SubstitutionSettings, TemplatedRequest};

use crate::error::{ApplicationError, ApplicationResult};
use crate::variable_resolver::{
    KeyResolver, PayloadResolver, RewriteResult, Rewriter, ScanError, has_placeholders,
};

/// A request field that placeholders are substituted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestField {
    /// The URL host.
    Host,
    /// The URL path.
    Path,
    /// The raw query string.
    Query,
    /// The request body.
    Body,
}

impl RequestField {
    /// Returns the field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys found in one rewritten field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    /// The field that was rewritten.
    pub field: RequestField,
    /// Keys that were substituted.
    pub resolved: Vec<String>,
    /// Keys that were left in place.
    pub unresolved: Vec<String>,
}

/// Summary of a request substitution.
///
/// Only fields that contained a `{` are listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Per-field results, in host, path, query, body order.
    pub fields: Vec<FieldReport>,
    /// Fields that contained a `{` but could not be scanned.
    ///
    /// A body that is not valid UTF-8 lands here and is passed through as is.
    pub unscanned: Vec<RequestField>,
}

impl SubstitutionReport {
    /// Returns the report for a single field, if it was rewritten.
    #[must_use]
    pub fn field(&self, field: RequestField) -> Option<&FieldReport> {
        self.fields.iter().find(|r| r.field == field)
    }

    /// Returns every unresolved key across all fields, without duplicates.
    #[must_use]
    pub fn unresolved_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for key in self.fields.iter().flat_map(|r| &r.unresolved) {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }

    /// Whether every placeholder in the request was substituted.
    ///
    /// False when a field was skipped, since its placeholders are unknown.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unscanned.is_empty() && self.fields.iter().all(|r| r.unresolved.is_empty())
    }
}

/// Rewritten values waiting to be committed to the request.
#[derive(Default)]
struct PendingFields {
    host: Option<String>,
    path: Option<String>,
    query: Option<String>,
    body: Option<Vec<u8>>,
}

/// Use case for substituting placeholders in a templated request.
///
/// Host, path, raw query and body are rewritten. Method and headers are left
/// alone. The call is all-or-nothing: if any step fails the request fields are
/// not modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstituteRequest {
    settings: SubstitutionSettings,
}

impl SubstituteRequest {
    /// Creates the use case with the given settings.
    #[must_use]
    pub const fn new(settings: SubstitutionSettings) -> Self {
        Self { settings }
    }

    /// Substitutes placeholders in `request` using a variables payload.
    ///
    /// An empty payload leaves every placeholder as written. Otherwise the
    /// payload must be a JSON object. On success the host override is cleared
    /// and any body is replaced by an in-memory copy of the rewritten bytes.
    ///
    /// # Errors
    /// - [`ApplicationError::VariablesDecode`] if the payload is not a JSON object
    /// - [`ApplicationError::BodyRead`] if reading the body fails; the body is lost
    /// - [`ApplicationError::MalformedToken`] if a field has an unterminated placeholder
    pub fn execute(
        &self,
        request: &mut TemplatedRequest,
        variables: impl AsRef<[u8]>,
    ) -> ApplicationResult<SubstitutionReport> {
        let resolver = PayloadResolver::from_payload(variables.as_ref(), self.settings.lookup)
            .map_err(ApplicationError::VariablesDecode)?;
        self.execute_with(request, &resolver)
    }

    /// Substitutes placeholders in `request` using an explicit resolver.
    ///
    /// # Errors
    ///
    /// See [`SubstituteRequest::execute`].
    pub fn execute_with<R>(
        &self,
        request: &mut TemplatedRequest,
        resolver: &R,
    ) -> ApplicationResult<SubstitutionReport>
    where
        R: KeyResolver + ?Sized,
    {
        let body = request.body.take().map(RequestBody::into_bytes).transpose()?;

        let mut report = SubstitutionReport::default();
        let pending = match self.rewrite_fields(request, body.as_deref(), resolver, &mut report) {
            Ok(pending) => pending,
            Err(err) => {
                request.body = body.map(RequestBody::Bytes);
                return Err(err);
            }
        };

        let target = &mut request.target;
        if let Some(host) = pending.host {
            target.host = host;
        }
        if let Some(path) = pending.path {
            target.path = path;
        }
        if let Some(query) = pending.query {
            target.raw_query = query;
        }
        request.host_override = None;
        request.body = pending.body.or(body).map(RequestBody::Bytes);

        for key in report.unresolved_keys() {
            tracing::debug!(key, "variable not found, placeholder kept");
        }

        Ok(report)
    }

    fn rewrite_fields<R>(
        &self,
        request: &TemplatedRequest,
        body: Option<&[u8]>,
        resolver: &R,
        report: &mut SubstitutionReport,
    ) -> ApplicationResult<PendingFields>
    where
        R: KeyResolver + ?Sized,
    {
        let rewriter = Rewriter::new(&self.settings);
        let target = &request.target;

        let mut pending = PendingFields {
            host: Self::rewrite_field(&rewriter, RequestField::Host, &target.host, resolver, report)?,
            path: Self::rewrite_field(&rewriter, RequestField::Path, &target.path, resolver, report)?,
            query: Self::rewrite_field(
                &rewriter,
                RequestField::Query,
                &target.raw_query,
                resolver,
                report,
            )?,
            body: None,
        };

        if let Some(bytes) = body.filter(|b| b.contains(&b'{')) {
            match std::str::from_utf8(bytes) {
                Ok(text) => {
                    pending.body =
                        Self::rewrite_field(&rewriter, RequestField::Body, text, resolver, report)?
                            .map(String::into_bytes);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "request body is not UTF-8, left unchanged");
                    report.unscanned.push(RequestField::Body);
                }
            }
        }

        Ok(pending)
    }

    fn rewrite_field<R>(
        rewriter: &Rewriter,
        field: RequestField,
        text: &str,
        resolver: &R,
        report: &mut SubstitutionReport,
    ) -> ApplicationResult<Option<String>>
    where
        R: KeyResolver + ?Sized,
    {
        if !has_placeholders(text) {
            return Ok(None);
        }

        let RewriteResult {
            output,
            resolved,
            unresolved,
        } = rewriter
            .rewrite(text, resolver)
            .map_err(|ScanError::Unterminated { offset }| ApplicationError::MalformedToken {
                field,
                offset,
            })?;

        tracing::debug!(
            %field,
            resolved = resolved.len(),
            unresolved = unresolved.len(),
            "rewrote request field"
        );
        report.fields.push(FieldReport {
            field,
            resolved,
            unresolved,
        });
        Ok(Some(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bearcub_domain::{LookupMode, RequestTarget, UnterminatedPolicy};
    use pretty_assertions::assert_eq;
    use std::io::{self, Read};

    fn request(url: &str) -> TemplatedRequest {
        TemplatedRequest::parse("GET", url).unwrap()
    }

    fn body_text(request: &TemplatedRequest) -> &str {
        std::str::from_utf8(request.body.as_ref().unwrap().as_bytes().unwrap()).unwrap()
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("connection reset"))
        }
    }

    #[test]
    fn test_replaces_host() {
        let mut req = request("http://{host}/").with_host_override("www.techcrunch.com");
        SubstituteRequest::default()
            .execute(&mut req, r#"{"host": "techcrunch.com"}"#)
            .unwrap();
        assert_eq!(req.target.host, "techcrunch.com");
        assert_eq!(req.host_override, None);
        assert_eq!(req.effective_host(), "techcrunch.com");
    }

    #[test]
    fn test_empty_payload_keeps_placeholders_and_clears_override() {
        let mut req = request("http://{host}/").with_host_override("www.techcrunch.com");
        let report = SubstituteRequest::default().execute(&mut req, "").unwrap();
        assert_eq!(req.target.host, "{host}");
        assert_eq!(req.effective_host(), "{host}");
        assert_eq!(report.unresolved_keys(), vec!["host"]);
    }

    #[test]
    fn test_method_and_headers_untouched() {
        let mut req = TemplatedRequest::new("{method}", RequestTarget::new("http", "{host}", "/"))
            .with_header("Authorization", "Bearer {apikey}");
        SubstituteRequest::default()
            .execute(&mut req, r#"{"host": "www.techcrunch.com", "apikey": "123"}"#)
            .unwrap();
        assert_eq!(req.method, "{method}");
        assert_eq!(req.headers.get("authorization"), Some("Bearer {apikey}"));
        assert_eq!(req.target.host, "www.techcrunch.com");
    }

    #[test]
    fn test_query_with_number() {
        let mut req = request("http://todos.stoplight.io/todos?apikey={apikey}");
        let report = SubstituteRequest::default()
            .execute(&mut req, r#"{"apikey": 123}"#)
            .unwrap();
        assert_eq!(req.target.raw_query, "apikey=123");
        assert!(report.is_complete());
        assert_eq!(report.field(RequestField::Query).unwrap().resolved, vec!["apikey"]);
        assert!(report.field(RequestField::Host).is_none());
    }

    #[test]
    fn test_body_from_reader_is_rewritten() {
        let mut req = request("http://www.google.com/search")
            .with_body(RequestBody::reader(io::Cursor::new(b"{body}".to_vec())));
        SubstituteRequest::default()
            .execute(&mut req, r#"{"body": "abcdef"}"#)
            .unwrap();
        assert_eq!(body_text(&req), "abcdef");
    }

    #[test]
    fn test_body_without_placeholders_is_buffered() {
        let mut req = request("http://h/")
            .with_body(RequestBody::reader(io::Cursor::new(b"abcdef".to_vec())));
        let report = SubstituteRequest::default().execute(&mut req, "{}").unwrap();
        assert_eq!(body_text(&req), "abcdef");
        assert!(report.fields.is_empty());
    }

    #[test]
    fn test_non_utf8_body_passes_through() {
        let bytes = vec![b'{', 0xff, b'}'];
        let mut req = request("http://h/").with_body(bytes.clone());
        let report = SubstituteRequest::default().execute(&mut req, "{}").unwrap();
        assert_eq!(req.body.unwrap().as_bytes(), Some(&bytes[..]));
        assert_eq!(report.unscanned, vec![RequestField::Body]);
        assert!(report.field(RequestField::Body).is_none());
        assert!(!report.is_complete());
    }

    #[test]
    fn test_utf8_body_without_placeholders_is_not_flagged() {
        let mut req = request("http://h/").with_body(b"plain".to_vec());
        let report = SubstituteRequest::default().execute(&mut req, "{}").unwrap();
        assert!(report.unscanned.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn test_decode_error_leaves_request_untouched() {
        let mut req = request("http://{host}/").with_host_override("www.techcrunch.com");
        let err = SubstituteRequest::default()
            .execute(&mut req, r#"{"host": "x",}"#)
            .unwrap_err();
        assert!(matches!(err, ApplicationError::VariablesDecode(_)));
        assert_eq!(req.target.host, "{host}");
        assert_eq!(req.host_override.as_deref(), Some("www.techcrunch.com"));
    }

    #[test]
    fn test_body_read_error() {
        let mut req = request("http://h/").with_body(RequestBody::reader(FailingReader));
        let err = SubstituteRequest::default().execute(&mut req, "{}").unwrap_err();
        assert!(matches!(err, ApplicationError::BodyRead(_)));
    }

    #[test]
    fn test_malformed_body_is_all_or_nothing() {
        let mut req = request("http://{host}/{path}").with_body("{unterminated");
        let err = SubstituteRequest::default()
            .execute(&mut req, r#"{"host": "h", "path": "p"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::MalformedToken {
                field: RequestField::Body,
                offset: 0
            }
        ));
        assert_eq!(req.target.host, "{host}");
        assert_eq!(req.target.path, "/{path}");
        assert_eq!(body_text(&req), "{unterminated");
    }

    #[test]
    fn test_literal_policy_accepts_unterminated() {
        let settings = SubstitutionSettings::default().with_unterminated(UnterminatedPolicy::Literal);
        let mut req = request("http://h/").with_body("{\"a\": \"{b\"");
        SubstituteRequest::new(settings)
            .execute(&mut req, r#"{"b": "x"}"#)
            .unwrap();
        assert_eq!(body_text(&req), "{\"a\": \"{b\"");
    }

    #[test]
    fn test_dotted_path_lookup() {
        let settings = SubstitutionSettings::default().with_lookup(LookupMode::DottedPath);
        let mut req =
            TemplatedRequest::new("GET", RequestTarget::new("http", "www.{url.host}", "{url.path}"));
        let vars = r#"{"url": {"host": "google.com", "path": "/search"}}"#;
        SubstituteRequest::new(settings).execute(&mut req, vars).unwrap();
        assert_eq!(req.target.to_string(), "http://www.google.com/search");
    }

    #[test]
    fn test_execute_with_closure() {
        let mut req = request("http://{host}/{ id }");
        let lookup = |key: &str| (key == "id").then(|| "42".to_string());
        let report = SubstituteRequest::default()
            .execute_with(&mut req, &lookup)
            .unwrap();
        assert_eq!(req.target.to_string(), "http://{host}/42");
        assert_eq!(report.unresolved_keys(), vec!["host"]);
    }
}
