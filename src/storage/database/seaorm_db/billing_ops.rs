use super::types::SeaOrmDatabase;
use crate::storage::database::entities::{
    billing_account, invoice, subscription, transaction, BillingAccount, Invoice, Subscription,
    Transaction,
};
use crate::utils::error::{AppError, Result};
use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

impl SeaOrmDatabase {
    // ==================== Billing Accounts ====================

    /// Get the billing account owned by a user, if one exists
    pub async fn find_account_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<billing_account::Model>> {
        BillingAccount::find()
            .filter(billing_account::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Create a billing account
    pub async fn insert_account(
        &self,
        user_id: Uuid,
        account_number: &str,
        billing_address: Option<String>,
        payment_method: Option<String>,
    ) -> Result<billing_account::Model> {
        debug!("Creating billing account for user: {}", user_id);
        let now = Utc::now();
        let account = billing_account::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            account_number: Set(account_number.to_string()),
            billing_address: Set(billing_address),
            payment_method: Set(payment_method),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        account.insert(&self.db).await.map_err(AppError::Database)
    }

    /// Update billing details on an existing account
    ///
    /// Absent fields are left untouched rather than cleared.
    pub async fn update_account(
        &self,
        account: billing_account::Model,
        billing_address: Option<String>,
        payment_method: Option<String>,
    ) -> Result<billing_account::Model> {
        let mut update: billing_account::ActiveModel = account.into();
        if let Some(address) = billing_address {
            update.billing_address = Set(Some(address));
        }
        if let Some(method) = payment_method {
            update.payment_method = Set(Some(method));
        }
        update.updated_at = Set(Utc::now().into());

        update.update(&self.db).await.map_err(AppError::Database)
    }

    // ==================== Invoices ====================

    /// Create an invoice on an account
    pub async fn insert_invoice(
        &self,
        billing_account_id: Uuid,
        invoice_number: &str,
        amount: f64,
        status: &str,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<invoice::Model> {
        debug!("Creating invoice on account: {}", billing_account_id);
        let record = invoice::ActiveModel {
            id: Set(Uuid::new_v4()),
            billing_account_id: Set(billing_account_id),
            invoice_number: Set(invoice_number.to_string()),
            amount: Set(amount),
            status: Set(status.to_string()),
            issued_date: Set(Utc::now().into()),
            due_date: Set(due_date.map(Into::into)),
            paid_date: Set(None),
        };

        record.insert(&self.db).await.map_err(AppError::Database)
    }

    /// All invoices on an account, newest first
    pub async fn list_invoices_for_account(
        &self,
        billing_account_id: Uuid,
    ) -> Result<Vec<invoice::Model>> {
        Invoice::find()
            .filter(invoice::Column::BillingAccountId.eq(billing_account_id))
            .order_by_desc(invoice::Column::IssuedDate)
            .all(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// The most recent invoices on an account
    pub async fn list_recent_invoices(
        &self,
        billing_account_id: Uuid,
        limit: u64,
    ) -> Result<Vec<invoice::Model>> {
        Invoice::find()
            .filter(invoice::Column::BillingAccountId.eq(billing_account_id))
            .order_by_desc(invoice::Column::IssuedDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Look up an invoice, scoped to the given account
    ///
    /// An invoice that exists but belongs to a different account is
    /// indistinguishable from one that does not exist.
    pub async fn find_invoice_for_account(
        &self,
        invoice_id: Uuid,
        billing_account_id: Uuid,
    ) -> Result<Option<invoice::Model>> {
        Invoice::find_by_id(invoice_id)
            .filter(invoice::Column::BillingAccountId.eq(billing_account_id))
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    // ==================== Subscriptions ====================

    /// Create a subscription on an account
    pub async fn insert_subscription(
        &self,
        billing_account_id: Uuid,
        plan_name: &str,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        status: &str,
    ) -> Result<subscription::Model> {
        debug!("Creating subscription on account: {}", billing_account_id);
        let record = subscription::ActiveModel {
            id: Set(Uuid::new_v4()),
            billing_account_id: Set(billing_account_id),
            plan_name: Set(plan_name.to_string()),
            start_date: Set(start_date.into()),
            end_date: Set(end_date.map(Into::into)),
            status: Set(status.to_string()),
            created_at: Set(Utc::now().into()),
        };

        record.insert(&self.db).await.map_err(AppError::Database)
    }

    /// All subscriptions on an account, newest start date first
    pub async fn list_subscriptions_for_account(
        &self,
        billing_account_id: Uuid,
    ) -> Result<Vec<subscription::Model>> {
        Subscription::find()
            .filter(subscription::Column::BillingAccountId.eq(billing_account_id))
            .order_by_desc(subscription::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::Database)
    }

    // ==================== Transactions ====================

    /// Record a transaction, optionally settling the linked invoice
    ///
    /// Runs as a single database transaction. The invoice lookup is scoped
    /// to the account, so a reference to another account's invoice fails the
    /// whole operation and nothing is written. When `mark_paid` is set and an
    /// invoice is linked, the invoice flips to paid in the same transaction
    /// as the insert; a crash can never record the payment without settling
    /// the invoice or vice versa.
    pub async fn record_transaction(
        &self,
        billing_account_id: Uuid,
        invoice_id: Option<Uuid>,
        amount: f64,
        status: &str,
        transaction_type: &str,
        mark_paid: bool,
    ) -> Result<(transaction::Model, Option<invoice::Model>)> {
        debug!(
            "Recording transaction on account: {} (invoice: {:?})",
            billing_account_id, invoice_id
        );
        let txn = self.db.begin().await.map_err(AppError::Database)?;

        // Resolve the linked invoice inside the transaction so the
        // ownership check and the settlement read the same snapshot.
        let linked_invoice = match invoice_id {
            Some(id) => {
                let found = Invoice::find_by_id(id)
                    .filter(invoice::Column::BillingAccountId.eq(billing_account_id))
                    .one(&txn)
                    .await
                    .map_err(AppError::Database)?;
                match found {
                    Some(inv) => Some(inv),
                    None => {
                        txn.rollback().await.map_err(AppError::Database)?;
                        return Err(AppError::NotFound(
                            "Invoice not found or does not belong to user".to_string(),
                        ));
                    }
                }
            }
            None => None,
        };

        let record = transaction::ActiveModel {
            id: Set(Uuid::new_v4()),
            billing_account_id: Set(billing_account_id),
            invoice_id: Set(invoice_id),
            amount: Set(amount),
            status: Set(status.to_string()),
            transaction_type: Set(transaction_type.to_string()),
            transaction_date: Set(Utc::now().into()),
        };
        let created = record.insert(&txn).await.map_err(AppError::Database)?;

        let settled = match (linked_invoice, mark_paid) {
            (Some(inv), true) => {
                let mut update: invoice::ActiveModel = inv.into();
                update.status = Set(invoice::STATUS_PAID.to_string());
                update.paid_date = Set(Some(Utc::now().into()));
                Some(update.update(&txn).await.map_err(AppError::Database)?)
            }
            (inv, _) => inv,
        };

        txn.commit().await.map_err(AppError::Database)?;
        Ok((created, settled))
    }

    /// Transactions recorded against one invoice, newest first
    pub async fn list_transactions_for_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<transaction::Model>> {
        Transaction::find()
            .filter(transaction::Column::InvoiceId.eq(invoice_id))
            .order_by_desc(transaction::Column::TransactionDate)
            .all(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// All transactions on an account with their linked invoices, newest first
    pub async fn list_transactions_with_invoices(
        &self,
        billing_account_id: Uuid,
    ) -> Result<Vec<(transaction::Model, Option<invoice::Model>)>> {
        Transaction::find()
            .filter(transaction::Column::BillingAccountId.eq(billing_account_id))
            .find_also_related(Invoice)
            .order_by_desc(transaction::Column::TransactionDate)
            .all(&self.db)
            .await
            .map_err(AppError::Database)
    }
}
