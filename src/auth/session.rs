//! Session lifecycle management

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::identity::Identity;
use super::password::generate_session_token;
use crate::config::models::AuthConfig;
use crate::storage::database::entities::user_session;
use crate::storage::database::Database;
use crate::utils::error::{AppError, Result};

/// Creates, validates and revokes login sessions
///
/// Sessions are opaque tokens stored server side; nothing about the user is
/// encoded in the token itself.
#[derive(Debug, Clone)]
pub struct SessionManager {
    database: Arc<Database>,
    config: AuthConfig,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(database: Arc<Database>, config: AuthConfig) -> Self {
        Self { database, config }
    }

    /// Session lifetime from configuration
    fn ttl(&self) -> Duration {
        Duration::hours(self.config.session_ttl_hours as i64)
    }

    /// Name of the cookie the session token travels in
    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Whether the session cookie should be marked Secure
    pub fn cookie_secure(&self) -> bool {
        self.config.cookie_secure
    }

    /// Open a new session for a user who just proved their identity
    pub async fn create_session(
        &self,
        user_id: uuid::Uuid,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<user_session::Model> {
        // Opportunistic cleanup keeps the table from accumulating dead rows
        // without needing a background task.
        if let Err(e) = self.database.delete_expired_sessions(Utc::now()).await {
            warn!("Failed to clean up expired sessions: {}", e);
        }

        let token = generate_session_token();
        let expires_at = Utc::now() + self.ttl();

        let session = self
            .database
            .create_session(&token, user_id, expires_at, ip_address, user_agent)
            .await?;

        info!("Session created for user: {}", user_id);
        Ok(session)
    }

    /// Resolve a token to the identity it authenticates
    ///
    /// Expired sessions are revoked on sight so the token cannot be retried.
    /// Every rejection reads the same on the wire; the reason only goes to
    /// the log.
    pub async fn authenticate(&self, token: &str) -> Result<Identity> {
        let Some((session, user)) = self.database.find_active_session(token).await? else {
            return Err(AppError::Unauthenticated("Unauthorized".to_string()));
        };

        if !session.is_live(Utc::now()) {
            debug!("Rejecting expired session for user: {}", session.user_id);
            self.database.revoke_session(token).await?;
            return Err(AppError::Unauthenticated("Unauthorized".to_string()));
        }

        let user = user.ok_or_else(|| {
            // FK cascade should make this unreachable, but a missing user
            // must never authenticate.
            AppError::Unauthenticated("Unauthorized".to_string())
        })?;

        self.database.touch_session(token).await?;

        Ok(Identity {
            user_id: user.id,
            session_id: session.id,
            username: user.username,
        })
    }

    /// Terminate a session
    pub async fn revoke(&self, token: &str) -> Result<()> {
        self.database.revoke_session(token).await?;
        info!("Session revoked");
        Ok(())
    }

    /// When a session created now would expire
    pub fn expiry_from_now(&self) -> DateTime<Utc> {
        Utc::now() + self.ttl()
    }
}
