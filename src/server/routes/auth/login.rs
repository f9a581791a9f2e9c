//! User login endpoint

use crate::auth::verify_password;
use crate::server::state::AppState;
use crate::utils::error::ErrorBody;
use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::Utc;
use tracing::{error, info, warn};

use super::models::{LoginRequest, LoginResponse, UserResponse};
use actix_web::ResponseError;

/// User login endpoint
pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    info!("User login attempt: {}", request.username);

    // Find user by username
    let user = match state
        .storage
        .database
        .find_user_by_username(&request.username)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("Login attempt with invalid username: {}", request.username);
            return Ok(
                HttpResponse::Unauthorized().json(ErrorBody::message("Invalid credentials"))
            );
        }
        Err(e) => {
            error!("Database error during login: {}", e);
            return Ok(e.error_response());
        }
    };

    // Verify password
    let password_valid = match verify_password(&request.password, &user.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            error!("Password verification error: {}", e);
            return Ok(e.error_response());
        }
    };

    if !password_valid {
        warn!(
            "Login attempt with invalid password for user: {}",
            request.username
        );
        return Ok(HttpResponse::Unauthorized().json(ErrorBody::message("Invalid credentials")));
    }

    // Update last login time
    if let Err(e) = state.storage.database.update_user_last_login(user.id).await {
        warn!("Failed to update last login time: {}", e);
    }

    let ip_address = req.connection_info().peer_addr().map(|s| s.to_string());
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let session = match state
        .sessions
        .create_session(user.id, ip_address, user_agent)
        .await
    {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to create session: {}", e);
            return Ok(e.error_response());
        }
    };

    let cookie = Cookie::build(state.sessions.cookie_name().to_string(), session.id.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.sessions.cookie_secure())
        .max_age(time::Duration::hours(
            state.config.auth.session_ttl_hours as i64,
        ))
        .finish();

    let response = LoginResponse {
        token: session.id,
        expires_at: session.expires_at.with_timezone(&Utc),
        user: UserResponse::from(user),
    };

    info!("User logged in: {}", response.user.username);
    Ok(HttpResponse::Ok().cookie(cookie).json(response))
}
