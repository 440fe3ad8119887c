//! Placeholder key resolvers
//!
//! A resolver maps the key found between `{` and `}` to replacement text.

use bearcub_domain::{DomainResult, LookupMode, Variables, render_value};

/// Outcome of resolving a single placeholder key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The key was found; the placeholder is replaced with this text.
    Found(String),
    /// The key is unknown; the placeholder is emitted unchanged.
    Unresolved,
}

impl Resolution {
    /// Returns true if the key was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Maps a placeholder key to its replacement.
///
/// `key` is the raw text between the delimiters; implementations trim it
/// before looking it up.
pub trait KeyResolver {
    /// Resolves a single key.
    fn resolve(&self, key: &str) -> Resolution;
}

/// Plain lookup functions act as resolvers. They receive the trimmed key.
impl<F> KeyResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, key: &str) -> Resolution {
        self(key.trim()).map_or(Resolution::Unresolved, Resolution::Found)
    }
}

/// A resolver that never finds anything, leaving every placeholder as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl KeyResolver for NoopResolver {
    fn resolve(&self, _key: &str) -> Resolution {
        Resolution::Unresolved
    }
}

/// A resolver backed by a decoded JSON object.
#[derive(Debug, Clone, Default)]
pub struct DictionaryResolver {
    variables: Variables,
    lookup: LookupMode,
}

impl DictionaryResolver {
    /// Creates a flat-lookup resolver over the given dictionary.
    #[must_use]
    pub fn new(variables: Variables) -> Self {
        Self {
            variables,
            lookup: LookupMode::Flat,
        }
    }

    /// Decodes a resolver from JSON object bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid JSON or not a JSON object.
    pub fn from_json(bytes: &[u8]) -> DomainResult<Self> {
        Variables::from_json_slice(bytes).map(Self::new)
    }

    /// Sets the lookup mode.
    #[must_use]
    pub const fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }

    /// Returns the backing dictionary.
    #[must_use]
    pub const fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Returns the backing dictionary for in-place updates between passes.
    pub const fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }
}

impl KeyResolver for DictionaryResolver {
    fn resolve(&self, key: &str) -> Resolution {
        let key = key.trim();
        let value = match self.lookup {
            LookupMode::Flat => self.variables.get(key),
            LookupMode::DottedPath => self.variables.get_path(key),
        };
        value.map_or(Resolution::Unresolved, |v| Resolution::Found(render_value(v)))
    }
}

/// The resolver selected by a variables payload: no-op when the payload is
/// empty, dictionary-backed otherwise.
#[derive(Debug, Clone)]
pub enum PayloadResolver {
    /// No payload was supplied.
    Noop(NoopResolver),
    /// The payload decoded to a dictionary.
    Dictionary(DictionaryResolver),
}

impl PayloadResolver {
    /// Builds a resolver from a variables payload.
    ///
    /// An empty or whitespace-only payload selects the no-op resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-empty payload is not a JSON object.
    pub fn from_payload(payload: &[u8], lookup: LookupMode) -> DomainResult<Self> {
        if payload.trim_ascii().is_empty() {
            return Ok(Self::Noop(NoopResolver));
        }
        DictionaryResolver::from_json(payload).map(|r| Self::Dictionary(r.with_lookup(lookup)))
    }
}

impl KeyResolver for PayloadResolver {
    fn resolve(&self, key: &str) -> Resolution {
        match self {
            Self::Noop(r) => r.resolve(key),
            Self::Dictionary(r) => r.resolve(key),
        }
    }
}
