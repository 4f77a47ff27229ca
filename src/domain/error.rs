//! Domain Error Types
//!
//! Ledger errors that don't depend on infrastructure.

use thiserror::Error;

/// Result type for ledger operations that can fail fatally.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Fatal ledger errors.
///
/// A missing account on deposit/withdraw/transfer is not an error: those
/// operations report it as `Ok(false)`. Only the cases below propagate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Debit exceeds the available balance
    #[error("Insufficient funds in account {account_id}: requested {requested}, available {available}")]
    InsufficientFunds {
        account_id: String,
        requested: i64,
        available: i64,
    },

    /// Account not found (balance query)
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Balance arithmetic left the i64 range
    #[error("Balance overflow in account {account_id}")]
    BalanceOverflow { account_id: String },
}

impl LedgerError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(account_id: impl Into<String>, requested: i64, available: i64) -> Self {
        Self::InsufficientFunds {
            account_id: account_id.into(),
            requested,
            available,
        }
    }

    /// Check if this is a client error (caller's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds { .. } | Self::BalanceOverflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_error() {
        let err = LedgerError::insufficient_funds("acc001", 1000, 400);

        assert!(err.is_client_error());
        let message = err.to_string();
        assert!(message.contains("acc001"));
        assert!(message.contains("1000"));
        assert!(message.contains("400"));
    }

    #[test]
    fn test_account_not_found_error() {
        let err = LedgerError::AccountNotFound("missing".to_string());

        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "Account not found: missing");
    }
}
