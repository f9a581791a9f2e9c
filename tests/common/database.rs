//! Test database utilities
//!
//! Provides in-memory SQLite databases for testing without external
//! dependencies. Each test gets an isolated database instance.

use std::sync::Arc;
use workledger::config::models::DatabaseConfig;
use workledger::storage::database::Database;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new in-memory test database with migrations applied
    ///
    /// Note: SQLite in-memory mode supports a single connection; a second
    /// connection would see a different, empty database.
    pub async fn new() -> Self {
        let db = Database::new(&test_db_config())
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }
}

/// Helper to create a simple test database config
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
        sqlx_logging: false,
    }
}

/// Create a standalone test database (convenience function)
pub async fn create_test_db() -> Database {
    let db = Database::new(&test_db_config())
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_standalone_db_creation() {
        let db = create_test_db().await;
        assert!(db.health_check().await.is_ok());
    }
}
