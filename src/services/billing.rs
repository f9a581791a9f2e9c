//! Billing service: accounts, invoices, subscriptions, transactions
//!
//! Every operation resolves the caller's billing account first; all reads
//! and writes are scoped to that account. Validation failures are collected
//! per field so a bad request reports everything wrong with it at once.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::Identity;
use crate::storage::database::entities::{billing_account, invoice, subscription, transaction};
use crate::storage::database::Database;
use crate::utils::error::{AppError, FieldError, Result};
use crate::utils::reference::{account_number, invoice_number, ReferenceSource};
use crate::utils::validation::{parse_client_date, require_min_amount, require_text, REQUIRED};

/// Partial update of billing account details; absent fields stay untouched
#[derive(Debug, Clone, Default)]
pub struct BillingAccountPatch {
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
}

/// Computed totals block for an invoice detail view
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Billing operations for the authenticated caller
#[derive(Clone)]
pub struct BillingService {
    database: Arc<Database>,
    references: Arc<dyn ReferenceSource>,
    tax_rate: f64,
}

impl BillingService {
    /// Create a new billing service
    pub fn new(database: Arc<Database>, references: Arc<dyn ReferenceSource>, tax_rate: f64) -> Self {
        Self {
            database,
            references,
            tax_rate,
        }
    }

    // ==================== Accounts ====================

    /// The caller's billing account, or NotFound
    pub async fn resolve_account(&self, identity: &Identity) -> Result<billing_account::Model> {
        self.database
            .find_account_by_user(identity.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Billing account not found".to_string()))
    }

    /// Open a billing account for the caller
    ///
    /// The duplicate check runs before payload validation; an account holder
    /// gets the conflict answer even for a malformed body.
    pub async fn create_account(
        &self,
        identity: &Identity,
        billing_address: Option<String>,
        payment_method: Option<String>,
    ) -> Result<billing_account::Model> {
        if self
            .database
            .find_account_by_user(identity.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Billing account already exists".to_string(),
            ));
        }

        let mut errors = Vec::new();

        let billing_address = match billing_address {
            Some(value) => {
                if let Err(e) = require_text("billingAddress", &value, "Billing address is required")
                {
                    errors.push(e);
                }
                Some(value)
            }
            None => {
                errors.push(FieldError::new("billingAddress", REQUIRED));
                None
            }
        };

        let payment_method = match payment_method {
            Some(value) => {
                if let Err(e) = require_text("paymentMethod", &value, "Payment method is required") {
                    errors.push(e);
                }
                Some(value)
            }
            None => {
                errors.push(FieldError::new("paymentMethod", REQUIRED));
                None
            }
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let number = account_number(self.references.as_ref());
        let account = self
            .database
            .insert_account(identity.user_id, &number, billing_address, payment_method)
            .await?;

        info!(
            "Billing account {} created for user {}",
            account.account_number, identity.username
        );
        Ok(account)
    }

    /// The caller's account with its subscriptions and invoices
    pub async fn account_overview(
        &self,
        identity: &Identity,
    ) -> Result<(
        billing_account::Model,
        Vec<subscription::Model>,
        Vec<invoice::Model>,
    )> {
        let account = self.resolve_account(identity).await?;
        let subscriptions = self.database.list_subscriptions_for_account(account.id).await?;
        let invoices = self.database.list_invoices_for_account(account.id).await?;
        Ok((account, subscriptions, invoices))
    }

    /// Update billing details on the caller's account
    pub async fn update_account(
        &self,
        identity: &Identity,
        patch: BillingAccountPatch,
    ) -> Result<billing_account::Model> {
        let account = self.resolve_account(identity).await?;

        let mut errors = Vec::new();
        if let Some(value) = patch.billing_address.as_deref() {
            if let Err(e) = require_text("billingAddress", value, "Billing address is required") {
                errors.push(e);
            }
        }
        if let Some(value) = patch.payment_method.as_deref() {
            if let Err(e) = require_text("paymentMethod", value, "Payment method is required") {
                errors.push(e);
            }
        }
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        self.database
            .update_account(account, patch.billing_address, patch.payment_method)
            .await
    }

    // ==================== Invoices ====================

    /// Create an invoice on the caller's account
    pub async fn create_invoice(
        &self,
        identity: &Identity,
        amount: Option<f64>,
        status: Option<String>,
        due_date: Option<String>,
    ) -> Result<invoice::Model> {
        let account = self.resolve_account(identity).await?;

        let mut errors = Vec::new();

        let amount = match amount {
            Some(value) => {
                if let Err(e) = require_min_amount("amount", value) {
                    errors.push(e);
                }
                value
            }
            None => {
                errors.push(FieldError::new("amount", REQUIRED));
                0.0
            }
        };

        let due_date = match due_date.as_deref() {
            Some(raw) => match parse_client_date("dueDate", raw) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let number = invoice_number(self.references.as_ref());
        let status = status.unwrap_or_else(|| invoice::STATUS_PENDING.to_string());

        let created = self
            .database
            .insert_invoice(account.id, &number, amount, &status, due_date)
            .await?;

        info!("Invoice {} created on account {}", created.invoice_number, account.account_number);
        Ok(created)
    }

    /// All invoices on the caller's account, newest first
    pub async fn list_invoices(&self, identity: &Identity) -> Result<Vec<invoice::Model>> {
        let account = self.resolve_account(identity).await?;
        self.database.list_invoices_for_account(account.id).await
    }

    /// One invoice with its transactions and a computed totals block
    pub async fn invoice_detail(
        &self,
        identity: &Identity,
        invoice_id: Uuid,
    ) -> Result<(invoice::Model, Vec<transaction::Model>, InvoiceTotals)> {
        let account = self.resolve_account(identity).await?;

        let invoice = self
            .database
            .find_invoice_for_account(invoice_id, account.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        let transactions = self.database.list_transactions_for_invoice(invoice.id).await?;
        let totals = self.compute_totals(invoice.amount);

        Ok((invoice, transactions, totals))
    }

    /// Totals for an invoice amount under the configured tax rate
    pub fn compute_totals(&self, amount: f64) -> InvoiceTotals {
        let subtotal = amount;
        let tax = round_cents(subtotal * self.tax_rate);
        InvoiceTotals {
            subtotal,
            tax,
            total: round_cents(subtotal + tax),
        }
    }

    // ==================== Subscriptions ====================

    /// Create a subscription on the caller's account
    pub async fn create_subscription(
        &self,
        identity: &Identity,
        plan_name: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
        status: Option<String>,
    ) -> Result<subscription::Model> {
        let account = self.resolve_account(identity).await?;

        let mut errors = Vec::new();

        let plan_name = match plan_name {
            Some(value) => {
                if let Err(e) = require_text("planName", &value, "Plan name is required") {
                    errors.push(e);
                }
                value
            }
            None => {
                errors.push(FieldError::new("planName", REQUIRED));
                String::new()
            }
        };

        let start_date = match start_date.as_deref() {
            Some(raw) => match parse_client_date("startDate", raw) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            None => {
                errors.push(FieldError::new("startDate", REQUIRED));
                None
            }
        };

        let end_date = match end_date.as_deref() {
            Some(raw) => match parse_client_date("endDate", raw) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        // Present, or the error check above would have returned
        let Some(start_date) = start_date else {
            return Err(AppError::Validation(vec![FieldError::new(
                "startDate", REQUIRED,
            )]));
        };
        let status = status.unwrap_or_else(|| subscription::STATUS_ACTIVE.to_string());

        let created = self
            .database
            .insert_subscription(account.id, &plan_name, start_date, end_date, &status)
            .await?;

        info!("Subscription to '{}' created on account {}", created.plan_name, account.account_number);
        Ok(created)
    }

    /// All subscriptions on the caller's account, newest start first
    pub async fn list_subscriptions(&self, identity: &Identity) -> Result<Vec<subscription::Model>> {
        let account = self.resolve_account(identity).await?;
        self.database.list_subscriptions_for_account(account.id).await
    }

    // ==================== Transactions ====================

    /// Record a transaction on the caller's account
    ///
    /// When `invoice_id` references an invoice the caller owns and the
    /// request carries an explicit `status` of `"success"` together with an
    /// explicit `transaction_type` of `"credit"`, the invoice is settled
    /// (status `paid`, paid date stamped) atomically with the insert.
    ///
    /// Settlement keys off the values the caller actually sent. A request
    /// that omits status or type still stores the defaults success/credit,
    /// but does not settle the invoice; callers must assert both values to
    /// trigger settlement. Kept deliberately, see DESIGN.md.
    pub async fn create_transaction(
        &self,
        identity: &Identity,
        invoice_id: Option<String>,
        amount: Option<f64>,
        status: Option<String>,
        transaction_type: Option<String>,
    ) -> Result<transaction::Model> {
        let account = self.resolve_account(identity).await?;

        let mut errors = Vec::new();
        let amount = match amount {
            Some(value) => {
                if let Err(e) = require_min_amount("amount", value) {
                    errors.push(e);
                }
                value
            }
            None => {
                errors.push(FieldError::new("amount", REQUIRED));
                0.0
            }
        };
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        // A reference that is not even a UUID cannot belong to the caller;
        // it gets the same answer as any other unresolvable invoice.
        let linked_invoice_id = match invoice_id.as_deref() {
            Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| {
                AppError::NotFound("Invoice not found or does not belong to user".to_string())
            })?),
            None => None,
        };

        let settle = settlement_requested(
            invoice_id.as_deref(),
            status.as_deref(),
            transaction_type.as_deref(),
        );

        let stored_status = status.unwrap_or_else(|| transaction::STATUS_SUCCESS.to_string());
        let stored_type =
            transaction_type.unwrap_or_else(|| transaction::TYPE_CREDIT.to_string());

        let (created, settled_invoice) = self
            .database
            .record_transaction(
                account.id,
                linked_invoice_id,
                amount,
                &stored_status,
                &stored_type,
                settle,
            )
            .await?;

        if settle {
            if let Some(inv) = settled_invoice {
                info!(
                    "Invoice {} settled by transaction {}",
                    inv.invoice_number, created.id
                );
            }
        }

        Ok(created)
    }

    /// All transactions on the caller's account with linked invoices
    pub async fn list_transactions(
        &self,
        identity: &Identity,
    ) -> Result<Vec<(transaction::Model, Option<invoice::Model>)>> {
        let account = self.resolve_account(identity).await?;
        self.database.list_transactions_with_invoices(account.id).await
    }

    // ==================== Dashboard ====================

    /// Account plus its three most recent invoices, if the caller has one
    pub async fn dashboard_summary(
        &self,
        identity: &Identity,
    ) -> Result<Option<(billing_account::Model, Vec<invoice::Model>)>> {
        let Some(account) = self.database.find_account_by_user(identity.user_id).await? else {
            return Ok(None);
        };
        let invoices = self.database.list_recent_invoices(account.id, 3).await?;
        Ok(Some((account, invoices)))
    }
}

/// Whether a transaction request asks for invoice settlement
///
/// True only when the invoice reference and both marker values are present
/// and explicit; defaulted values never settle.
fn settlement_requested(
    invoice_id: Option<&str>,
    status: Option<&str>,
    transaction_type: Option<&str>,
) -> bool {
    invoice_id.is_some()
        && status == Some(transaction::STATUS_SUCCESS)
        && transaction_type == Some(transaction::TYPE_CREDIT)
}

/// Round to two decimal places for currency display
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
