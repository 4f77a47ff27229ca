//! API Middleware
//!
//! Request context, API key authentication and request logging.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};

use crate::domain::OperationContext;
use crate::error::AppError;

use super::AppState;

/// Correlation header, read from requests and echoed on responses
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// API key header
pub const API_KEY_HEADER: &str = "x-api-key";

/// Hex SHA-256 digest of an API key
pub fn hash_api_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

// =========================================================================
// Context + API Key Authentication Middleware
// =========================================================================

/// Attach an [`OperationContext`] and, when an API key is configured,
/// require a matching `X-API-Key` header.
///
/// The client's `X-Correlation-Id` is echoed back unchanged when usable;
/// see [`OperationContext::from_client_id`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let context = OperationContext::from_client_id(
        headers.get(CORRELATION_HEADER).and_then(|v| v.to_str().ok()),
    );

    if let Some(expected) = state.api_key_hash.as_deref() {
        let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
        if presented.map(hash_api_key).as_deref() != Some(expected) {
            tracing::warn!(
                correlation_id = %context.correlation_id,
                key_present = presented.is_some(),
                "Rejected request with missing or invalid API key"
            );
            return with_correlation_header(
                AppError::InvalidApiKey.into_response(),
                &context.correlation_id,
            );
        }
    }

    let correlation_id = context.correlation_id.clone();
    request.extensions_mut().insert(context);

    let response = next.run(request).await;
    with_correlation_header(response, &correlation_id)
}

fn with_correlation_header(mut response: Response, correlation_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(correlation_id) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Headers whose values never reach the logs
const SENSITIVE_HEADERS: &[&str] = &[API_KEY_HEADER, "authorization", "cookie"];

/// `name=value` pairs for logging, with credentials replaced
pub fn redacted_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                "[REDACTED]"
            } else {
                value.to_str().unwrap_or("[non-ascii]")
            };
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The user and account a request path addresses, if any.
///
/// `/users/:user_id[/accounts]` yields the user; `/accounts/:account_id[/..]`
/// yields the account. Transfers carry their accounts in the body.
pub fn ledger_ids(path: &str) -> (Option<&str>, Option<&str>) {
    let mut segments = path.trim_start_matches('/').split('/');
    match (segments.next(), segments.next()) {
        (Some("users"), Some(user_id)) if !user_id.is_empty() => (Some(user_id), None),
        (Some("accounts"), Some(account_id)) if !account_id.is_empty() => {
            (None, Some(account_id))
        }
        _ => (None, None),
    }
}

/// Log each ledger request with the ids it touches and its outcome
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let (user_id, account_id) = ledger_ids(&path);
    let (user_id, account_id) = (user_id.map(str::to_string), account_id.map(str::to_string));

    let correlation_id = request
        .extensions()
        .get::<OperationContext>()
        .map(|ctx| ctx.correlation_id.clone())
        .unwrap_or_default();

    tracing::debug!(
        %method,
        %path,
        %correlation_id,
        headers = %redacted_headers(request.headers()),
        "Ledger request"
    );

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(%method, %path, ?user_id, ?account_id, %correlation_id, %status, duration_ms, "Ledger request failed");
    } else {
        tracing::info!(%method, %path, ?user_id, ?account_id, %correlation_id, %status, duration_ms, "Ledger request completed");
    }

    response
}
