//! Account entity
//!
//! An account is a keyed record holding an integer balance (smallest
//! currency unit) and an optional reference to its owning user.

use serde::{Deserialize, Serialize};

use crate::repository::Entity;

/// Monetary account.
///
/// The balance is mutated only by the ledger operations in
/// [`AccountService`](crate::services::AccountService); the setters here
/// exist so the service can apply a change to a freshly read copy before
/// writing it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account ID (primary key, immutable)
    id: String,

    /// Current balance in the smallest currency unit
    balance: i64,

    /// Owner user ID, set once the account is associated with a user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner_id: Option<String>,
}

impl Account {
    /// Create an account with no owner.
    pub fn new(id: impl Into<String>, balance: i64) -> Self {
        Self {
            id: id.into(),
            balance,
            owner_id: None,
        }
    }

    /// Create an account already associated with an owner.
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn set_balance(&mut self, balance: i64) {
        self.balance = balance;
    }

    pub fn set_owner_id(&mut self, owner_id: impl Into<String>) {
        self.owner_id = Some(owner_id.into());
    }

    /// Whether this account belongs to the given user.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id.as_deref() == Some(user_id)
    }
}

impl Entity for Account {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_new_has_no_owner() {
        let account = Account::new("acc001", 500);

        assert_eq!(account.id(), "acc001");
        assert_eq!(account.balance(), 500);
        assert!(account.owner_id().is_none());
        assert!(!account.is_owned_by("user123"));
    }

    #[test]
    fn test_account_with_owner() {
        let account = Account::new("acc001", 0).with_owner("user123");

        assert_eq!(account.owner_id(), Some("user123"));
        assert!(account.is_owned_by("user123"));
        assert!(!account.is_owned_by("user456"));
    }

    #[test]
    fn test_account_serialization_omits_missing_owner() {
        let json = serde_json::to_value(Account::new("acc001", 42)).unwrap();

        assert_eq!(json["id"], "acc001");
        assert_eq!(json["balance"], 42);
        assert!(json.get("owner_id").is_none());
    }
}
