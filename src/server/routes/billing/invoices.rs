//! Invoice endpoints

use crate::auth::Identity;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{HttpResponse, ResponseError, Result as ActixResult, web};
use tracing::debug;
use uuid::Uuid;

use super::models::{CreateInvoiceRequest, InvoiceDetail};

/// Create an invoice on the authenticated user's account
pub async fn create_invoice(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<CreateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Invoice creation requested by {}", identity.username);

    let request = request.into_inner();
    match state
        .billing
        .create_invoice(&identity, request.amount, request.status, request.due_date)
        .await
    {
        Ok(invoice) => Ok(HttpResponse::Created().json(invoice)),
        Err(e) => Ok(e.error_response()),
    }
}

/// All invoices on the authenticated user's account, newest first
pub async fn list_invoices(
    state: web::Data<AppState>,
    identity: Identity,
) -> ActixResult<HttpResponse> {
    match state.billing.list_invoices(&identity).await {
        Ok(invoices) => Ok(HttpResponse::Ok().json(invoices)),
        Err(e) => Ok(e.error_response()),
    }
}

/// One invoice with its transactions and computed totals
pub async fn get_invoice(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    // A malformed id resolves to nothing, same as an unknown one
    let invoice_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => {
            return Ok(AppError::NotFound("Invoice not found".to_string()).error_response());
        }
    };

    match state.billing.invoice_detail(&identity, invoice_id).await {
        Ok((invoice, transactions, totals)) => Ok(HttpResponse::Ok().json(InvoiceDetail {
            invoice,
            transactions,
            totals,
        })),
        Err(e) => Ok(e.error_response()),
    }
}
