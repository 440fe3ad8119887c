//! Bearcub Infrastructure - Adapters and implementations
//!
//! This crate connects the substitution engine to the outside world:
//! building `reqwest` requests from substituted templates and loading
//! substitution settings from disk.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{ConversionError, ReqwestRequestPreparer, into_reqwest};
pub use persistence::{SettingsError, SettingsRepository};
pub use serialization::{
    FileFormat, SerializationError, from_json_bytes, from_yaml_bytes, to_json_stable, to_yaml,
};
