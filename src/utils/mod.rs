//! Utility modules for workledger
//!
//! ## Module Organization
//!
//! - **error**: the crate-wide error enum and its HTTP mapping
//! - **validation**: field-level payload validators and date parsing
//! - **reference**: generated human-readable account/invoice numbers

pub mod error;
pub mod reference;
pub mod validation;

pub use error::{AppError, ErrorBody, FieldError, Result};
pub use reference::{ReferenceSource, UuidReferenceSource, format_reference};
