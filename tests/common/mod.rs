//! Common test utilities for workledger
//!
//! This module provides shared test infrastructure for all tests:
//! - In-memory SQLite database support
//! - Test fixtures and data factories
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{database, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = database::TestDatabase::new().await;
//!     let user = fixtures::UserFactory::create(db.db()).await;
//!     // ...
//! }
//! ```

pub mod database;

// Re-export commonly used items
pub use database::TestDatabase;
pub use fixtures::{BillingFactory, ProjectFactory, UserFactory, identity_for};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
