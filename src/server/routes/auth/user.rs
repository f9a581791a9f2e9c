//! Current user endpoint

use crate::auth::Identity;
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::{HttpResponse, ResponseError, Result as ActixResult, web};

use super::models::UserResponse;

/// Current authenticated user endpoint
pub async fn current_user(
    state: web::Data<AppState>,
    identity: Identity,
) -> ActixResult<HttpResponse> {
    match state.storage.database.find_user_by_id(identity.user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(UserResponse::from(user))),
        // The session authenticated but the user row is gone; treat the
        // session as invalid rather than reporting a partial user.
        Ok(None) => Ok(AppError::Unauthenticated("Unauthorized".to_string()).error_response()),
        Err(e) => Ok(e.error_response()),
    }
}
