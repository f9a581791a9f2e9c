use super::types::SeaOrmDatabase;
use crate::storage::database::entities::{user, User};
use crate::utils::error::{AppError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

impl SeaOrmDatabase {
    /// Get a user by ID
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>> {
        debug!("Finding user by id: {}", user_id);
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Get a user by username
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        debug!("Finding user by username: {}", username);
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Get a user by email address
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Create a new user record
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        display_name: Option<String>,
    ) -> Result<user::Model> {
        debug!("Creating user: {}", username);
        let now = Utc::now();
        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            display_name: Set(display_name),
            last_login_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        user.insert(&self.db).await.map_err(AppError::Database)
    }

    /// Record a successful login
    pub async fn update_user_last_login(&self, user_id: Uuid) -> Result<()> {
        let now = Utc::now();
        let update = user::ActiveModel {
            id: Set(user_id),
            last_login_at: Set(Some(now.into())),
            updated_at: Set(now.into()),
            ..Default::default()
        };
        update.update(&self.db).await.map_err(AppError::Database)?;
        Ok(())
    }
}
