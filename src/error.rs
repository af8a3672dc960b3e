//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service layer returns [`AppError`]. Handlers
//! propagate it with `?` and axum turns it into a JSON error envelope:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Link not found", "details": { "id": 7 } } }
//! ```
//!
//! Store and hashing failures are logged in full and answered with a generic
//! `internal_error` body; their text never reaches the client.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input fields.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("Username already exists")]
    DuplicateUsername { username: String },

    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    /// Bad signature, malformed token, or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Access denied, admin only")]
    AccessDenied,

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("Failed to allocate a unique short code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("Short code '{code}' is already in use")]
    DuplicateCode { code: String },

    /// Transient connectivity fault talking to the store.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[source] sqlx::Error),

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for failures where a bounded local retry may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::DuplicateUsername { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateCode { .. } => StatusCode::CONFLICT,
            Self::AllocationExhausted { .. }
            | Self::StoreUnavailable(_)
            | Self::Store(_)
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::DuplicateUsername { .. } => "duplicate_username",
            Self::InvalidCredentials => "invalid_credentials",
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::AccessDenied => "access_denied",
            Self::NotFound { .. } => "not_found",
            Self::DuplicateCode { .. } => "duplicate_code",
            Self::AllocationExhausted { .. }
            | Self::StoreUnavailable(_)
            | Self::Store(_)
            | Self::Internal { .. } => "internal_error",
        }
    }

    /// Builds the client-facing payload. Internal failures are reduced to a
    /// generic message.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::Validation { message, details } | Self::NotFound { message, details } => {
                (message.clone(), details.clone())
            }
            Self::DuplicateUsername { username } => {
                (self.to_string(), json!({ "username": username }))
            }
            Self::DuplicateCode { code } => (self.to_string(), json!({ "code": code })),
            Self::InvalidCredentials
            | Self::MissingToken
            | Self::InvalidToken
            | Self::AccessDenied => (self.to_string(), json!({})),
            Self::AllocationExhausted { .. }
            | Self::StoreUnavailable(_)
            | Self::Store(_)
            | Self::Internal { .. } => ("Internal Server Error".to_string(), json!({})),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, "{}", self);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::StoreUnavailable(e),
            other => Self::Store(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        Self::bad_request("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        Self::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        Self::bad_request("Invalid path parameter", json!({ "reason": e.body_text() }))
    }
}
