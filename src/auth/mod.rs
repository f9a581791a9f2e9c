//! Authentication for Workledger
//!
//! Password credentials are verified with Argon2 and exchanged for opaque
//! session tokens stored server side. The session middleware resolves tokens
//! to an [`Identity`] which handlers receive as an extractor.

/// Caller identity extractor
pub mod identity;
/// Password hashing and token generation
pub mod password;
/// Session lifecycle management
pub mod session;

pub use identity::Identity;
pub use password::{generate_session_token, hash_password, verify_password};
pub use session::SessionManager;
