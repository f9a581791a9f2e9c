//! User registration endpoint

use crate::auth::hash_password;
use crate::server::state::AppState;
use crate::utils::error::{AppError, ErrorBody};
use crate::utils::validation::{validate_email, validate_password, validate_username};
use actix_web::{HttpResponse, ResponseError, Result as ActixResult, web};
use tracing::{error, info};

use super::models::{RegisterRequest, UserResponse};

/// User registration endpoint
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    info!("User registration attempt: {}", request.username);

    // Validate input, collecting every field failure
    let mut errors = Vec::new();
    if let Err(e) = validate_username(&request.username) {
        errors.push(e);
    }
    if let Err(e) = validate_email(&request.email) {
        errors.push(e);
    }
    if let Err(e) = validate_password(&request.password) {
        errors.push(e);
    }
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorBody::fields(errors)));
    }

    // Check if user already exists
    match state
        .storage
        .database
        .find_user_by_username(&request.username)
        .await
    {
        Ok(Some(_)) => {
            return Ok(
                AppError::Conflict("Username already exists".to_string()).error_response()
            );
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing user: {}", e);
            return Ok(e.error_response());
        }
    }

    // Check if email already exists
    match state
        .storage
        .database
        .find_user_by_email(&request.email)
        .await
    {
        Ok(Some(_)) => {
            return Ok(AppError::Conflict("Email already exists".to_string()).error_response());
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing email: {}", e);
            return Ok(e.error_response());
        }
    }

    // Hash password
    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            return Ok(e.error_response());
        }
    };

    // Store user in database
    let request = request.into_inner();
    match state
        .storage
        .database
        .create_user(
            &request.username,
            &request.email,
            &password_hash,
            request.display_name,
        )
        .await
    {
        Ok(user) => {
            info!("User registered successfully: {}", user.username);
            Ok(HttpResponse::Created().json(UserResponse::from(user)))
        }
        Err(e) => {
            error!("Failed to create user: {}", e);
            Ok(e.error_response())
        }
    }
}
