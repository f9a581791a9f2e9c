use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Billing account database model
///
/// One per user by application rule; the table itself carries no
/// uniqueness constraint on user_id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "billing_accounts")]
pub struct Model {
    /// Account ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning user ID
    pub user_id: Uuid,

    /// Generated human-readable number (`ACC-XXXXXXXX`, unique)
    #[sea_orm(unique)]
    pub account_number: String,

    /// Free-text billing address (optional)
    pub billing_address: Option<String>,

    /// Payment method tag (optional, open string set)
    pub payment_method: Option<String>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Billing account entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to user relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    /// Invoices relation
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoices,

    /// Subscriptions relation
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscriptions,

    /// Transactions relation
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
