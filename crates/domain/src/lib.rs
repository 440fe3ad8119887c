//! Bearcub Domain - Core types
//!
//! This crate defines the types shared by the substitution engine and its
//! adapters: the variable dictionary, templated requests and settings.
//! All types here are pure Rust with no I/O dependencies beyond `std::io::Read`
//! for request bodies.

pub mod error;
pub mod request;
pub mod settings;
pub mod variables;

pub use error::{DomainError, DomainResult};
pub use request::{RequestBody, RequestHeader, RequestHeaders, RequestTarget, TemplatedRequest};
pub use settings::{LookupMode, ScanMode, SubstitutionSettings, UnterminatedPolicy};
pub use variables::{Variables, render_value};
