//! Request and response models for billing endpoints
//!
//! Success responses serialize the entity models directly; the wrappers
//! here flatten an entity together with its related collections so the
//! wire shape stays a single flat object per resource.

use crate::services::InvoiceTotals;
use crate::storage::database::entities::{billing_account, invoice, subscription, transaction};
use serde::{Deserialize, Serialize};

/// Billing account creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
}

/// Billing account update request; absent fields stay untouched
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
}

/// Invoice creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

/// Subscription creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub plan_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// Transaction creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub invoice_id: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub transaction_type: Option<String>,
}

/// Billing account with its subscriptions and invoices
#[derive(Debug, Serialize)]
pub struct AccountOverview {
    #[serde(flatten)]
    pub account: billing_account::Model,
    pub subscriptions: Vec<subscription::Model>,
    pub invoices: Vec<invoice::Model>,
}

/// Invoice with its transactions and computed totals
#[derive(Debug, Serialize)]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: invoice::Model,
    pub transactions: Vec<transaction::Model>,
    pub totals: InvoiceTotals,
}

/// Transaction with the invoice it applies to, if any
#[derive(Debug, Serialize)]
pub struct TransactionWithInvoice {
    #[serde(flatten)]
    pub transaction: transaction::Model,
    pub invoice: Option<invoice::Model>,
}
