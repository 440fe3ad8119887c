//! Serialization helpers for settings files.
//!
//! JSON output is deterministic (2-space indentation, trailing newline) so
//! settings files diff cleanly. YAML is accepted as an alternative format.

mod json;
mod yaml;

pub use json::*;
pub use yaml::*;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// YAML (de)serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// File formats understood by the settings loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl FileFormat {
    /// Picks the format from a file extension. Unknown extensions map to JSON.
    #[must_use]
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension.map(str::to_ascii_lowercase).as_deref() {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    /// Deserializes bytes in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid for this format or do not
    /// match `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(self, bytes: &[u8]) -> Result<T, SerializationError> {
        match self {
            Self::Json => from_json_bytes(bytes),
            Self::Yaml => from_yaml_bytes(bytes),
        }
    }

    /// Serializes a value in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode<T: serde::Serialize>(self, value: &T) -> Result<Vec<u8>, SerializationError> {
        match self {
            Self::Json => to_json_stable(value).map(String::into_bytes),
            Self::Yaml => to_yaml(value).map(String::into_bytes),
        }
    }
}
