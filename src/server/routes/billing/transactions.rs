//! Transaction endpoints

use crate::auth::Identity;
use crate::server::state::AppState;
use actix_web::{HttpResponse, ResponseError, Result as ActixResult, web};
use tracing::debug;

use super::models::{CreateTransactionRequest, TransactionWithInvoice};

/// Record a transaction on the authenticated user's account
///
/// The raw request values are handed to the service untouched; whether the
/// linked invoice gets settled depends on what the caller sent, not on the
/// defaults stored for omitted fields.
pub async fn create_transaction(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<CreateTransactionRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Transaction requested by {}", identity.username);

    let request = request.into_inner();
    match state
        .billing
        .create_transaction(
            &identity,
            request.invoice_id,
            request.amount,
            request.status,
            request.transaction_type,
        )
        .await
    {
        Ok(transaction) => Ok(HttpResponse::Created().json(transaction)),
        Err(e) => Ok(e.error_response()),
    }
}

/// All transactions on the authenticated user's account, newest first
pub async fn list_transactions(
    state: web::Data<AppState>,
    identity: Identity,
) -> ActixResult<HttpResponse> {
    match state.billing.list_transactions(&identity).await {
        Ok(transactions) => {
            let body: Vec<TransactionWithInvoice> = transactions
                .into_iter()
                .map(|(transaction, invoice)| TransactionWithInvoice {
                    transaction,
                    invoice,
                })
                .collect();
            Ok(HttpResponse::Ok().json(body))
        }
        Err(e) => Ok(e.error_response()),
    }
}
