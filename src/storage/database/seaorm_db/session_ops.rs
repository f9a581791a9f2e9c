use super::types::SeaOrmDatabase;
use crate::storage::database::entities::{user, user_session, UserSession};
use crate::utils::error::{AppError, Result};
use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

impl SeaOrmDatabase {
    /// Persist a new login session
    pub async fn create_session(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<user_session::Model> {
        debug!("Creating session for user: {}", user_id);
        let now = Utc::now();
        let session = user_session::ActiveModel {
            id: Set(token.to_string()),
            user_id: Set(user_id),
            expires_at: Set(expires_at.into()),
            created_at: Set(now.into()),
            last_accessed_at: Set(now.into()),
            ip_address: Set(ip_address),
            user_agent: Set(user_agent),
            is_active: Set(true),
        };

        session.insert(&self.db).await.map_err(AppError::Database)
    }

    /// Look up an active session together with its user
    ///
    /// Expiry is not checked here; callers decide what "expired" means so
    /// the same query serves both validation and inspection.
    pub async fn find_active_session(
        &self,
        token: &str,
    ) -> Result<Option<(user_session::Model, Option<user::Model>)>> {
        UserSession::find_by_id(token)
            .filter(user_session::Column::IsActive.eq(true))
            .find_also_related(crate::storage::database::entities::User)
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Bump the last-accessed timestamp of a session
    pub async fn touch_session(&self, token: &str) -> Result<()> {
        let update = user_session::ActiveModel {
            id: Set(token.to_string()),
            last_accessed_at: Set(Utc::now().into()),
            ..Default::default()
        };
        update.update(&self.db).await.map_err(AppError::Database)?;
        Ok(())
    }

    /// Deactivate a session so the token can no longer authenticate
    pub async fn revoke_session(&self, token: &str) -> Result<()> {
        debug!("Revoking session");
        let update = user_session::ActiveModel {
            id: Set(token.to_string()),
            is_active: Set(false),
            ..Default::default()
        };
        update.update(&self.db).await.map_err(AppError::Database)?;
        Ok(())
    }

    /// Remove sessions that expired before the given instant
    pub async fn delete_expired_sessions(&self, before: DateTime<Utc>) -> Result<u64> {
        let result = UserSession::delete_many()
            .filter(user_session::Column::ExpiresAt.lt(before))
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected > 0 {
            debug!("Deleted {} expired sessions", result.rows_affected);
        }
        Ok(result.rows_affected)
    }
}
