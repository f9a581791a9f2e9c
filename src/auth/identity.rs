//! Authenticated caller identity

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::utils::error::AppError;

/// The authenticated caller of a request
///
/// Inserted into request extensions by the session middleware after the
/// token has been validated. Handlers receive it as an extractor, so every
/// data access is explicit about who is asking.
#[derive(Debug, Clone)]
pub struct Identity {
    /// ID of the authenticated user
    pub user_id: Uuid,
    /// Token of the session that authenticated this request
    pub session_id: String,
    /// Username, for logging and display
    pub username: String,
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Identity>() {
            Some(identity) => ready(Ok(identity.clone())),
            // Only reachable if a handler is registered outside the session
            // middleware; protected routes never get this far unauthenticated.
            None => ready(Err(
                AppError::Unauthenticated("Unauthorized".to_string()).into(),
            )),
        }
    }
}
