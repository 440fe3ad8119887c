//! Variable resolution module
//!
//! Provides rewriting of `{variable}` placeholders in strings.
//!
//! # Usage
//!
//! ```
//! use bearcub_application::variable_resolver::{DictionaryResolver, rewrite};
//!
//! let resolver = DictionaryResolver::from_json(br#"{"host": "localhost", "port": 8080}"#).unwrap();
//!
//! let result = rewrite("http://{host}:{ port }/{missing}", &resolver).unwrap();
//! assert_eq!(result, "http://localhost:8080/{missing}");
//! ```

pub mod engine;
pub mod resolver;

pub use engine::{RewriteResult, Rewriter, ScanError, has_placeholders, rewrite};
pub use resolver::{DictionaryResolver, KeyResolver, NoopResolver, PayloadResolver, Resolution};
