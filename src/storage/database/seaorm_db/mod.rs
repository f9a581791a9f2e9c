mod types;

mod billing_ops;
mod connection;
mod project_ops;
mod session_ops;
mod user_ops;

pub use types::SeaOrmDatabase;
