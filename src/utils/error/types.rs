//! Error types for workledger

use serde::Serialize;
use thiserror::Error;

/// Result type alias for workledger
pub type Result<T> = std::result::Result<T, AppError>;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Main error type for workledger
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing, expired, or revoked session
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated but not authorized for the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Missing account, project, invoice, or cross-account reference
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate resource creation; surfaced to clients as 400
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Field-level payload validation failures
    #[error("Validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// Password hashing and verification errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Migration errors
    #[error("Migration error: {0}")]
    Migration(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-field validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}
