//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::auth::SessionManager;
use crate::config::Config;
use crate::services::{BillingService, ProjectService};
use crate::storage::StorageLayer;
use crate::utils::reference::UuidReferenceSource;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// This struct contains shared resources that need to be accessed across
/// multiple request handlers. All fields are wrapped in Arc for efficient
/// sharing across threads.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (shared read-only)
    pub config: Arc<Config>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Session manager
    pub sessions: Arc<SessionManager>,
    /// Billing service
    pub billing: Arc<BillingService>,
    /// Project service
    pub projects: Arc<ProjectService>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let database = Arc::clone(&storage.database);

        let sessions = SessionManager::new(Arc::clone(&database), config.auth.clone());
        let billing = BillingService::new(
            Arc::clone(&database),
            Arc::new(UuidReferenceSource),
            config.billing.tax_rate,
        );
        let projects = ProjectService::new(database);

        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            sessions: Arc::new(sessions),
            billing: Arc::new(billing),
            projects: Arc::new(projects),
        }
    }

    /// Get application configuration
    #[allow(dead_code)] // May be used by handlers
    pub fn config(&self) -> &Config {
        &self.config
    }
}
