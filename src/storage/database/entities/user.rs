use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account row. Never serialized to the wire as-is; responses go through
/// the `UserResponse` and `PublicUser` DTOs, which omit the hash.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Login name, unique across the table
    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 hash, never the raw password
    pub password_hash: String,

    /// Optional human-facing name shown instead of the username
    pub display_name: Option<String>,

    /// Set on each successful login
    pub last_login_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_session::Entity")]
    UserSessions,

    /// Projects where this user is the owner
    #[sea_orm(has_many = "super::project::Entity")]
    Projects,

    /// Membership rows granting access to other users' projects
    #[sea_orm(has_many = "super::project_member::Entity")]
    ProjectMembers,

    #[sea_orm(has_many = "super::billing_account::Entity")]
    BillingAccounts,
}

impl Related<super::user_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSessions.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::project_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectMembers.def()
    }
}

impl Related<super::billing_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillingAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
