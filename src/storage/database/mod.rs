//! SeaORM-backed persistence: entities, schema migrations, and the
//! query operations built on top of them.

pub mod entities;
pub mod migration;
pub mod seaorm_db;

pub use seaorm_db::SeaOrmDatabase as Database;
