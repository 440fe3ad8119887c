//! Application use cases (business logic orchestration).

mod substitute_request;

pub use substitute_request::*;
