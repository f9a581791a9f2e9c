use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status applied to projects created without one
pub const STATUS_ACTIVE: &str = "active";

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Project ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user ID
    pub owner_id: Uuid,

    /// Project name
    pub name: String,

    /// Project description (optional)
    pub description: Option<String>,

    /// Project status (free-form; "active" by default)
    pub status: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp (drives list ordering)
    pub updated_at: DateTimeWithTimeZone,
}

/// Project entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to owning user relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,

    /// Membership rows relation
    #[sea_orm(has_many = "super::project_member::Entity")]
    Members,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::project_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
