use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Server-side session row. The primary key doubles as the opaque token
/// handed to the client, so a row lookup is the whole credential check.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_sessions")]
pub struct Model {
    /// Opaque session token (64 hex chars)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning user
    pub user_id: Uuid,

    /// Hard expiry; the row is dead after this regardless of activity
    pub expires_at: DateTimeWithTimeZone,

    pub created_at: DateTimeWithTimeZone,

    /// Bumped on every authenticated request
    pub last_accessed_at: DateTimeWithTimeZone,

    /// Client IP captured at login
    pub ip_address: Option<String>,

    /// Client user agent captured at login
    pub user_agent: Option<String>,

    /// Cleared on logout instead of deleting the row
    pub is_active: bool,
}

impl Model {
    /// A session is live when active and not yet expired
    pub fn is_live(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.is_active && self.expires_at.with_timezone(&chrono::Utc) > now
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
