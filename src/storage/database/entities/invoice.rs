use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice status value for freshly created invoices
pub const STATUS_PENDING: &str = "pending";
/// Invoice status value set by the paid transition
pub const STATUS_PAID: &str = "paid";

/// Invoice database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    /// Invoice ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning billing account ID
    pub billing_account_id: Uuid,

    /// Generated human-readable number (`INV-XXXXXXXX`, unique)
    #[sea_orm(unique)]
    pub invoice_number: String,

    /// Invoice amount (validated >= 0.01 at creation)
    pub amount: f64,

    /// Status: free-form string; "pending" by default, "paid" only via
    /// the transaction-driven transition, "overdue" settable by clients
    pub status: String,

    /// Issue timestamp, system-set at creation
    pub issued_date: DateTimeWithTimeZone,

    /// Due date (optional, client-supplied)
    pub due_date: Option<DateTimeWithTimeZone>,

    /// Paid timestamp, set only by the paid transition
    pub paid_date: Option<DateTimeWithTimeZone>,
}

/// Invoice entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to billing account relation
    #[sea_orm(
        belongs_to = "super::billing_account::Entity",
        from = "Column::BillingAccountId",
        to = "super::billing_account::Column::Id"
    )]
    BillingAccount,

    /// Linked transactions relation
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::billing_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillingAccount.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
