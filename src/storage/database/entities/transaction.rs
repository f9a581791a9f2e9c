use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction status recorded when the client omits one
pub const STATUS_SUCCESS: &str = "success";
/// Transaction type recorded when the client omits one
pub const TYPE_CREDIT: &str = "credit";

/// Payment transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Transaction ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning billing account ID
    pub billing_account_id: Uuid,

    /// Linked invoice (optional; must belong to the same account)
    pub invoice_id: Option<Uuid>,

    /// Transaction amount (validated >= 0.01 at creation)
    pub amount: f64,

    /// Status ("success" by default)
    pub status: String,

    /// Transaction type ("credit" by default)
    pub transaction_type: String,

    /// Transaction timestamp, system-set at creation
    pub transaction_date: DateTimeWithTimeZone,
}

/// Transaction entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to billing account relation
    #[sea_orm(
        belongs_to = "super::billing_account::Entity",
        from = "Column::BillingAccountId",
        to = "super::billing_account::Column::Id"
    )]
    BillingAccount,

    /// Belongs to invoice relation (optional link)
    #[sea_orm(
        belongs_to = "super::invoice::Entity",
        from = "Column::InvoiceId",
        to = "super::invoice::Column::Id"
    )]
    Invoice,
}

impl Related<super::billing_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillingAccount.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
