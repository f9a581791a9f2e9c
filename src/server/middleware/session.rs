//! Session authentication middleware

use crate::server::middleware::helpers::{extract_session_token, is_public_route};
use crate::server::state::AppState;
use crate::utils::error::AppError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures_util::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

/// Session middleware for Actix-web
///
/// Every route outside the public list requires a valid session token. The
/// token is resolved against the database before the handler runs, and the
/// resulting [`crate::auth::Identity`] is inserted into request extensions
/// for handlers to extract. Requests without a valid session are answered
/// with 401 before any handler logic, including its validation.
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = SessionAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for session middleware
pub struct SessionAuthService<S> {
    // Rc because the service is called after an await on the token lookup
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_route(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Missing application state")
                })?;

            let Some(token) = extract_session_token(req.headers(), state.sessions.cookie_name())
            else {
                debug!("No session token on protected route: {}", req.path());
                return Err(AppError::Unauthenticated("Unauthorized".to_string()).into());
            };

            let identity = match state.sessions.authenticate(&token).await {
                Ok(identity) => identity,
                Err(e) => {
                    debug!("Session rejected on {}: {}", req.path(), e);
                    return Err(e.into());
                }
            };

            req.extensions_mut().insert(identity);
            service.call(req).await
        })
    }
}
