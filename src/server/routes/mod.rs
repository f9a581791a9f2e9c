//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.
//! Success bodies serialize the domain models directly (camelCase on the
//! wire); error bodies always carry the `{"error": ...}` shape produced by
//! [`crate::utils::error::ErrorBody`].

pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod health;
pub mod projects;
