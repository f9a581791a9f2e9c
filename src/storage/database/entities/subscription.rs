use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subscription status value for freshly created subscriptions
pub const STATUS_ACTIVE: &str = "active";

/// Subscription database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    /// Subscription ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning billing account ID
    pub billing_account_id: Uuid,

    /// Plan name (required, non-empty)
    pub plan_name: String,

    /// Subscription start (required, client-supplied)
    pub start_date: DateTimeWithTimeZone,

    /// Subscription end (optional)
    pub end_date: Option<DateTimeWithTimeZone>,

    /// Status: "active" by default, only ever changed by explicit request
    pub status: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// Subscription entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to billing account relation
    #[sea_orm(
        belongs_to = "super::billing_account::Entity",
        from = "Column::BillingAccountId",
        to = "super::billing_account::Column::Id"
    )]
    BillingAccount,
}

impl Related<super::billing_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillingAccount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
