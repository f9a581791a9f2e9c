//! Session termination endpoint

use crate::server::middleware::extract_session_token;
use crate::server::state::AppState;
use actix_web::cookie::{Cookie, time};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::{info, warn};

/// User logout endpoint
///
/// Revokes the session behind the presented token and expires the session
/// cookie. Revocation failure is logged but does not fail the request; the
/// cookie is gone either way.
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    info!("User logout");

    if let Some(token) = extract_session_token(req.headers(), state.sessions.cookie_name()) {
        if let Err(e) = state.sessions.revoke(&token).await {
            warn!("Failed to revoke session: {}", e);
        }
    }

    let removal = Cookie::build(state.sessions.cookie_name().to_string(), "")
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(removal)
        .json(serde_json::json!({"success": true})))
}
