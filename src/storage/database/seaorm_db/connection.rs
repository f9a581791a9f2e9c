use crate::config::models::DatabaseConfig;
use crate::utils::error::{AppError, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{info, warn};

use super::super::migration::Migrator;
use super::types::SeaOrmDatabase;

/// Connection string used when the configured backend is unreachable.
const SQLITE_FALLBACK_URL: &str = "sqlite://data/workledger.db?mode=rwc";

impl SeaOrmDatabase {
    /// Open a connection pool against the configured backend.
    ///
    /// When a Postgres URL cannot be reached, the pool degrades to a local
    /// SQLite file under `data/` so a checkout runs without external services.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let primary = open_pool(
            &config.url,
            config.max_connections,
            config.connection_timeout,
            config.sqlx_logging,
        )
        .await;

        match primary {
            Ok(db) => {
                info!(
                    "Database connection established ({})",
                    backend_name(&config.url)
                );
                Ok(Self { db })
            }
            Err(e) if is_postgres_url(&config.url) => {
                warn!(
                    "Primary database unreachable: {}. Falling back to {}",
                    e, SQLITE_FALLBACK_URL
                );
                std::fs::create_dir_all("data").map_err(|e| {
                    AppError::Internal(format!("Failed to create data directory: {}", e))
                })?;
                let db = open_pool(SQLITE_FALLBACK_URL, 5, 5, config.sqlx_logging).await?;
                info!("SQLite fallback connection established");
                Ok(Self { db })
            }
            Err(e) => Err(e),
        }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            AppError::Database(e)
        })?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Borrow the underlying SeaORM connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Round-trip a trivial query to confirm the pool is alive.
    pub async fn health_check(&self) -> Result<()> {
        self.db.ping().await.map_err(AppError::Database)
    }
}

fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

fn backend_name(url: &str) -> &'static str {
    if is_postgres_url(url) {
        "postgres"
    } else {
        "sqlite"
    }
}

async fn open_pool(
    url: &str,
    pool_size: u32,
    connect_timeout_secs: u64,
    sqlx_logging: bool,
) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(pool_size)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(sqlx_logging)
        .sqlx_logging_level(log::LevelFilter::Debug);

    Database::connect(options).await.map_err(AppError::Database)
}
