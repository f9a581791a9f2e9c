//! Unified error handling
//!
//! One error enum for the whole crate, mapped centrally onto the HTTP
//! surface. Every error body on the wire is `{"error": <message or
//! field list>}`.

mod response;
mod types;

pub use response::{ErrorBody, ErrorPayload};
pub use types::{AppError, FieldError, Result};
