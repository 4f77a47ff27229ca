//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::LedgerError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("Account already exists: {0}")]
    AccountExists(String),

    // Ledger errors
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    // Server errors (5xx)
    #[error("Storage rejected the write for {0}")]
    WriteFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// HTTP status, machine-readable code and optional details
    fn parts(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 401 Unauthorized
            AppError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "invalid_api_key", None),

            // 404 Not Found
            AppError::UserNotFound(id) => {
                (StatusCode::NOT_FOUND, "user_not_found", Some(id.clone()))
            }
            AppError::AccountNotFound(id) => {
                (StatusCode::NOT_FOUND, "account_not_found", Some(id.clone()))
            }

            // 409 Conflict
            AppError::UserExists(id) => (StatusCode::CONFLICT, "user_exists", Some(id.clone())),
            AppError::AccountExists(id) => {
                (StatusCode::CONFLICT, "account_exists", Some(id.clone()))
            }

            // Ledger errors - map to appropriate HTTP status
            AppError::Ledger(ledger_err) => match ledger_err {
                LedgerError::InsufficientFunds { account_id, .. } => (
                    StatusCode::BAD_REQUEST,
                    "insufficient_funds",
                    Some(account_id.clone()),
                ),
                LedgerError::AccountNotFound(id) => {
                    (StatusCode::NOT_FOUND, "account_not_found", Some(id.clone()))
                }
                LedgerError::BalanceOverflow { account_id } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "balance_overflow",
                    Some(account_id.clone()),
                ),
            },

            // 500 Internal Server Error
            AppError::WriteFailed(what) => {
                tracing::error!("Write failed: {}", what);
                (StatusCode::INTERNAL_SERVER_ERROR, "write_failed", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = self.parts();

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_maps_to_bad_request() {
        let err = AppError::from(LedgerError::insufficient_funds("acc001", 10, 5));
        let (status, code, details) = err.parts();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "insufficient_funds");
        assert_eq!(details.as_deref(), Some("acc001"));
    }

    #[test]
    fn test_ledger_not_found_maps_to_404() {
        let err = AppError::from(LedgerError::AccountNotFound("ghost".to_string()));
        assert_eq!(err.parts().0, StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Account not found: ghost");
    }

    #[test]
    fn test_conflicts() {
        assert_eq!(
            AppError::UserExists("u1".to_string()).parts().0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::AccountExists("a1".to_string()).parts().1,
            "account_exists"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::InvalidApiKey.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
