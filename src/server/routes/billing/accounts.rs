//! Billing account endpoints

use crate::auth::Identity;
use crate::server::state::AppState;
use crate::services::BillingAccountPatch;
use actix_web::{HttpResponse, ResponseError, Result as ActixResult, web};
use tracing::debug;

use super::models::{AccountOverview, CreateAccountRequest, UpdateAccountRequest};

/// Open a billing account for the authenticated user
pub async fn create_account(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<CreateAccountRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Billing account creation requested by {}", identity.username);

    let request = request.into_inner();
    match state
        .billing
        .create_account(&identity, request.billing_address, request.payment_method)
        .await
    {
        Ok(account) => Ok(HttpResponse::Created().json(account)),
        Err(e) => Ok(e.error_response()),
    }
}

/// The authenticated user's account with subscriptions and invoices
pub async fn get_account(
    state: web::Data<AppState>,
    identity: Identity,
) -> ActixResult<HttpResponse> {
    match state.billing.account_overview(&identity).await {
        Ok((account, subscriptions, invoices)) => Ok(HttpResponse::Ok().json(AccountOverview {
            account,
            subscriptions,
            invoices,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

/// Update billing details on the authenticated user's account
pub async fn update_account(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<UpdateAccountRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    let patch = BillingAccountPatch {
        billing_address: request.billing_address,
        payment_method: request.payment_method,
    };

    match state.billing.update_account(&identity, patch).await {
        Ok(account) => Ok(HttpResponse::Ok().json(account)),
        Err(e) => Ok(e.error_response()),
    }
}
