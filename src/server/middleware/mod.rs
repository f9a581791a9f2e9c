//! HTTP middleware implementations
//!
//! This module provides middleware for request processing:
//! - Session authentication (token lookup + identity injection)
//! - Helpers for token extraction and route classification

mod helpers;
mod session;

// Re-export all middleware
pub use helpers::{extract_session_token, is_public_route};
pub use session::{SessionAuth, SessionAuthService};
