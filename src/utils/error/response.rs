//! HTTP response handling for errors

use super::types::{AppError, FieldError};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

/// Wire format for every error body: `{"error": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorPayload,
}

/// The `error` value is either a plain message or a list of field errors
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Message(String),
    Fields(Vec<FieldError>),
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: ErrorPayload::Message(message.into()),
        }
    }

    pub fn fields(errors: Vec<FieldError>) -> Self {
        Self {
            error: ErrorPayload::Fields(errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Duplicate creation is reported as a bad request, not 409
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let body = match self {
            AppError::Unauthenticated(message)
            | AppError::Forbidden(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => ErrorBody::message(message.clone()),
            AppError::Validation(errors) => ErrorBody::fields(errors.clone()),
            other => {
                // 5xx details go to the log, never to the client
                error!("Internal error while handling request: {}", other);
                ErrorBody::message("Internal server error")
            }
        };

        HttpResponse::build(status).json(body)
    }
}
