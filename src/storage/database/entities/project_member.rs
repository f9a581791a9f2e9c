use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project membership database model
///
/// A join row granting one user read access to one project, with an
/// optional role tag. The (project_id, user_id) pair is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "project_members")]
pub struct Model {
    /// Membership ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Project this membership belongs to
    pub project_id: Uuid,

    /// Member user ID
    pub user_id: Uuid,

    /// Role tag (optional)
    pub role: Option<String>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// Project member entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to project relation
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,

    /// Belongs to user relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
