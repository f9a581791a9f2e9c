//! Authentication configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in hours
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,
    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the session cookie Secure (HTTPS only)
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
        }
    }
}

impl AuthConfig {
    /// Merge auth configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.session_ttl_hours != default_session_ttl_hours() {
            self.session_ttl_hours = other.session_ttl_hours;
        }
        if other.cookie_name != default_cookie_name() {
            self.cookie_name = other.cookie_name;
        }
        if other.cookie_secure {
            self.cookie_secure = other.cookie_secure;
        }
        self
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.session_ttl_hours == 0 {
            return Err("Session TTL cannot be 0".to_string());
        }

        if self.session_ttl_hours > 24 * 365 {
            return Err("Session TTL should not exceed one year".to_string());
        }

        if self.cookie_name.is_empty() {
            return Err("Session cookie name cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Warn about insecure authentication settings
pub fn warn_insecure_config(config: &AuthConfig) {
    if !config.cookie_secure {
        warn!("Session cookie is not marked Secure; use cookie_secure: true behind HTTPS");
    }
}
