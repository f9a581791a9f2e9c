//! Subscription endpoints

use crate::auth::Identity;
use crate::server::state::AppState;
use actix_web::{HttpResponse, ResponseError, Result as ActixResult, web};
use tracing::debug;

use super::models::CreateSubscriptionRequest;

/// Create a subscription on the authenticated user's account
pub async fn create_subscription(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<CreateSubscriptionRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Subscription creation requested by {}", identity.username);

    let request = request.into_inner();
    match state
        .billing
        .create_subscription(
            &identity,
            request.plan_name,
            request.start_date,
            request.end_date,
            request.status,
        )
        .await
    {
        Ok(subscription) => Ok(HttpResponse::Created().json(subscription)),
        Err(e) => Ok(e.error_response()),
    }
}

/// All subscriptions on the authenticated user's account, newest start first
pub async fn list_subscriptions(
    state: web::Data<AppState>,
    identity: Identity,
) -> ActixResult<HttpResponse> {
    match state.billing.list_subscriptions(&identity).await {
        Ok(subscriptions) => Ok(HttpResponse::Ok().json(subscriptions)),
        Err(e) => Ok(e.error_response()),
    }
}
