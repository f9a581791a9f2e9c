use sea_orm::DatabaseConnection;

/// SeaORM-backed persistence handle shared across request handlers.
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
}
