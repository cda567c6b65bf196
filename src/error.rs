//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service layer returns [`AppError`]. The
//! variants follow the failure classes of link creation and lookup; the
//! [`IntoResponse`] impl turns each one into a JSON error body with a stable
//! machine-readable `code`.

use axum::{
    Json,
    http::StatusCode,
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
    /// Malformed user input. Never retried.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The short code is already taken. Retried inside link creation.
    #[error("short code '{code}' already exists")]
    Collision { code: String },

    /// No unique short code within the retry bound.
    #[error("unable to generate a unique short code after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },

    /// Any persistence failure not classified above.
    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// The OS entropy source failed.
    #[error("random source failure: {0}")]
    RandomSource(String),
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

    pub fn store(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Status code, stable error code and details for this error.
    fn parts(&self) -> (StatusCode, &'static str, Value) {
        match self {
            AppError::Validation { details, .. } => {
                (StatusCode::BAD_REQUEST, "validation_error", details.clone())
            }
            AppError::NotFound { details, .. } => {
                (StatusCode::NOT_FOUND, "not_found", details.clone())
            }
            AppError::Collision { code } => {
                (StatusCode::CONFLICT, "collision", json!({ "code": code }))
            }
            AppError::ExhaustedRetries { attempts } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "exhausted_retries",
                json!({ "attempts": attempts }),
            ),
            AppError::Store { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                json!({}),
            ),
            AppError::RandomSource(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "random_source_error",
                json!({}),
            ),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, details) = self.parts();
        let message = match self {
            // Internal failures are logged, not leaked to clients.
            AppError::Store { .. } => "Database error".to_string(),
            AppError::RandomSource(_) => "Internal error".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _, _) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(errors))
    }
}
