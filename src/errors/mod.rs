//! Error handling module for the party ledger backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response bodies.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Required field(s) missing or unusable
    Validation {
        message: String,
        /// Field name -> whether that field was missing
        missing_fields: Option<Map<String, Value>>,
    },
    /// A unique field is already taken
    Conflict(String),
    /// Referenced record does not exist
    NotFound {
        message: String,
        /// Name and value of the reference that failed to resolve
        reference: Option<(&'static str, String)>,
    },
    /// Credential mismatch
    Unauthorized(String),
    /// Body could not be decoded
    BadRequest(String),
    /// Unexpected persistence or runtime failure
    Internal { message: String, error: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            missing_fields: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
            reference: None,
        }
    }

    /// Replace the caller-facing message of an internal error, keeping the cause.
    ///
    /// Other kinds already carry their own message and pass through untouched.
    pub fn context(self, message: &str) -> Self {
        match self {
            AppError::Internal { error, .. } => AppError::Internal {
                message: message.to_string(),
                error,
            },
            other => other,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => codes::VALIDATION_ERROR,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::NotFound { .. } => codes::NOT_FOUND,
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Internal { .. } => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation { message, .. } => message.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::NotFound { message, .. } => message.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Internal { message, .. } => message.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Internal { message, error } => {
                write!(f, "{}: {} ({})", self.error_code(), message, error)
            }
            _ => write!(f, "{}: {}", self.error_code(), self.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Internal {
            message: "Database error".to_string(),
            error: err.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::info!("Rejected request body: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let mut details = Map::new();
        let mut missing_fields = None;
        let mut cause = None;

        match error {
            AppError::Validation {
                missing_fields: fields,
                ..
            } => missing_fields = fields.clone(),
            AppError::NotFound {
                reference: Some((name, value)),
                ..
            } => {
                details.insert(name.to_string(), Value::String(value.clone()));
            }
            AppError::Internal { error, .. } => cause = Some(error.clone()),
            _ => {}
        }

        Self {
            code: error.error_code().to_string(),
            message: error.message(),
            missing_fields,
            error: cause,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
