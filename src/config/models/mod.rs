//! Configuration data models
//!
//! This module defines all configuration structures used throughout the
//! server.

#![allow(missing_docs)]

pub mod auth;
pub mod billing;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use billing::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB; every payload is a small JSON document
}

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    10
}

/// Default database connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    30
}

/// Default session lifetime in hours (30 days)
pub fn default_session_ttl_hours() -> u64 {
    720
}

/// Default session cookie name
pub fn default_cookie_name() -> String {
    "session".to_string()
}

/// Default invoice tax rate
pub fn default_tax_rate() -> f64 {
    0.10
}

pub fn default_true() -> bool {
    true
}
