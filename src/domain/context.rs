//! Operation Context
//!
//! Per-request metadata carried alongside ledger calls for tracing.

use uuid::Uuid;

/// Longest client-supplied correlation ID that is passed through as is
pub const MAX_CORRELATION_ID_LEN: usize = 128;

/// Context for an operation, attached to each request by the API middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    /// Correlation ID for request tracing, echoed back to the client
    pub correlation_id: String,
}

impl OperationContext {
    /// Context with a fresh v4 correlation ID
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    /// Keep the caller's correlation ID when it is usable, otherwise mint one.
    ///
    /// Any opaque token is accepted: it only has to be non-blank and at most
    /// [`MAX_CORRELATION_ID_LEN`] bytes.
    pub fn from_client_id(client_id: Option<&str>) -> Self {
        match client_id.map(str::trim) {
            Some(id) if !id.is_empty() && id.len() <= MAX_CORRELATION_ID_LEN => Self {
                correlation_id: id.to_string(),
            },
            _ => Self::new(),
        }
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}
