//! Configuration management
//!
//! Configuration is loaded from a YAML file, then overlaid with
//! `WORKLEDGER_*` environment variables. Every section carries its own
//! defaults and `validate()`.

pub mod models;

pub use models::*;

use crate::utils::error::{AppError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Billing configuration
    #[serde(default)]
    pub billing: BillingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        let config = config.apply_env()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables over defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `WORKLEDGER_*` (and `DATABASE_URL`) environment variables
    fn apply_env(mut self) -> Result<Self> {
        if let Ok(host) = std::env::var("WORKLEDGER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("WORKLEDGER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid WORKLEDGER_PORT: {}", e)))?;
        }
        if let Ok(workers) = std::env::var("WORKLEDGER_WORKERS") {
            self.server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| AppError::Config(format!("Invalid WORKLEDGER_WORKERS: {}", e)))?,
            );
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.storage.database.url = url;
        }
        if let Ok(url) = std::env::var("WORKLEDGER_DATABASE_URL") {
            self.storage.database.url = url;
        }
        if let Ok(ttl) = std::env::var("WORKLEDGER_SESSION_TTL_HOURS") {
            self.auth.session_ttl_hours = ttl.parse().map_err(|e| {
                AppError::Config(format!("Invalid WORKLEDGER_SESSION_TTL_HOURS: {}", e))
            })?;
        }
        if let Ok(rate) = std::env::var("WORKLEDGER_TAX_RATE") {
            self.billing.tax_rate = rate
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid WORKLEDGER_TAX_RATE: {}", e)))?;
        }
        Ok(self)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// Get billing configuration
    pub fn billing(&self) -> &BillingConfig {
        &self.billing
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| AppError::Config(format!("Server config error: {}", e)))?;

        self.server
            .cors
            .validate()
            .map_err(|e| AppError::Config(format!("CORS config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| AppError::Config(format!("Storage config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| AppError::Config(format!("Auth config error: {}", e)))?;

        self.billing
            .validate()
            .map_err(|e| AppError::Config(format!("Billing config error: {}", e)))?;

        models::auth::warn_insecure_config(&self.auth);

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.auth = self.auth.merge(other.auth);
        self.billing = self.billing.merge(other.billing);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
