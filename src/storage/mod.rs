//! Persistence for Workledger.
//!
//! [`StorageLayer`] owns the database handle and is shared with the HTTP
//! layer through the application state.

pub mod database;

use crate::config::models::StorageConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Owns the storage backends and hands out references to them.
#[derive(Debug, Clone)]
pub struct StorageLayer {
    pub database: Arc<database::Database>,
}

impl StorageLayer {
    /// Connect the configured backends.
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let database = Arc::new(database::Database::new(&config.database).await?);
        info!("Storage layer ready");
        Ok(Self { database })
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// Probe the database connection.
    pub async fn health_check(&self) -> Result<()> {
        self.database.health_check().await
    }
}
