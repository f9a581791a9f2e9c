//! Billing endpoints
//!
//! One billing account per user, owning invoices, subscriptions, and
//! transactions. Every handler resolves the caller's account through the
//! billing service; a caller without an account gets 404 before any
//! payload handling.

mod accounts;
mod invoices;
mod models;
mod subscriptions;
mod transactions;

pub use accounts::{create_account, get_account, update_account};
pub use invoices::{create_invoice, get_invoice, list_invoices};
pub use models::{
    AccountOverview, CreateAccountRequest, CreateInvoiceRequest, CreateSubscriptionRequest,
    CreateTransactionRequest, InvoiceDetail, TransactionWithInvoice, UpdateAccountRequest,
};
pub use subscriptions::{create_subscription, list_subscriptions};
pub use transactions::{create_transaction, list_transactions};

use actix_web::web;

/// Configure billing routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/billing")
            .route("/accounts", web::post().to(create_account))
            .route("/accounts", web::get().to(get_account))
            .route("/accounts", web::put().to(update_account))
            .route("/invoices", web::post().to(create_invoice))
            .route("/invoices", web::get().to(list_invoices))
            .route("/invoices/{id}", web::get().to(get_invoice))
            .route("/subscriptions", web::post().to(create_subscription))
            .route("/subscriptions", web::get().to(list_subscriptions))
            .route("/transactions", web::post().to(create_transaction))
            .route("/transactions", web::get().to(list_transactions)),
    );
}
