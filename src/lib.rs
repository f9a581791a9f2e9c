//! # workledger
//!
//! A project management and billing backend written in Rust. Exposes a
//! session-authenticated JSON API for projects and team membership plus a
//! billing domain of accounts, invoices, subscriptions, and payment
//! transactions.
//!
//! ## Features
//!
//! - **Session Authentication**: DB-backed opaque session tokens, delivered
//!   via cookie or `Authorization: Session` header
//! - **Billing Core**: one billing account per user owning invoices,
//!   subscriptions, and transactions with generated `ACC-`/`INV-` numbers
//! - **Invoice Lifecycle**: invoices transition to `paid` exactly when a
//!   matching successful credit transaction is recorded, atomically
//! - **Project Access Control**: owner-or-member reads, owner-only writes
//! - **SQLite or PostgreSQL**: sea-orm with versioned migrations applied at
//!   startup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use workledger::{Config, Workledger};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/workledger.yaml").await?;
//!     let app = Workledger::new(config).await?;
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use utils::error::{AppError, Result};

use tracing::info;

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The assembled application: storage connected, routes mounted.
///
/// Library-level entry point. The `workledger` binary reaches the same
/// server through [`server::builder::run_server`], which also handles
/// configuration loading.
pub struct Workledger {
    server: server::HttpServer,
}

impl Workledger {
    /// Wire up storage and the HTTP server from a loaded configuration.
    pub async fn new(config: Config) -> Result<Self> {
        let server = server::HttpServer::new(&config).await?;
        Ok(Self { server })
    }

    /// Serve requests until the process is stopped.
    pub async fn run(self) -> Result<()> {
        info!("Starting {} v{}", NAME, VERSION);
        self.server.start().await
    }
}

/// Build metadata reported by the `/version` endpoint.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

/// Build metadata embedded at compile time.
///
/// The `BUILD_TIME`, `GIT_HASH`, and `RUST_VERSION` variables come from the
/// build script; each falls back to `"unknown"` outside a full build.
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
    }
}
