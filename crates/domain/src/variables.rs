//! Variable dictionary
//!
//! The decoded JSON object that backs dictionary lookups. Values keep their
//! JSON type until substitution time, when [`render_value`] turns them into
//! the text that replaces a placeholder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// A mapping from variable name to a dynamically typed JSON value.
///
/// Built once per substitution pass and read-only afterwards. [`Variables::insert`]
/// exists for callers that rebuild values between passes; it needs `&mut self`,
/// so a dictionary shared across threads must not be mutated while lookups run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    values: Map<String, Value>,
}

impl Variables {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a dictionary from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidVariables`] if the input is not well-formed
    /// JSON or its top level is not an object.
    pub fn from_json_slice(bytes: &[u8]) -> DomainResult<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| DomainError::InvalidVariables(e.to_string()))?;

        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(DomainError::InvalidVariables(format!(
                "expected a JSON object at the top level, found {}",
                type_name(&other)
            ))),
        }
    }

    /// Decodes a dictionary from a JSON string.
    ///
    /// # Errors
    ///
    /// See [`Variables::from_json_slice`].
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        Self::from_json_slice(json.as_bytes())
    }

    /// Flat lookup of a single key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Looks up a dotted key path such as `url.host`.
    ///
    /// A key that exists verbatim (dots included) wins over the path walk.
    /// Each segment descends into a nested object; arrays are not indexed.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.values.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Returns the number of top-level variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the dictionary holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for Variables {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Renders a JSON value as substitution text.
///
/// Strings are emitted verbatim (no quotes), numbers in their minimal decimal
/// form, booleans as `true`/`false`, `null` as `null`, and arrays or objects
/// as compact JSON.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
