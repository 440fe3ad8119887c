//! Adapters to external HTTP libraries.

mod reqwest_request;

pub use reqwest_request::{ConversionError, ReqwestRequestPreparer, into_reqwest};
