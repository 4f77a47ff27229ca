//! Account Service
//!
//! The ledger core: account lifecycle and balance-affecting operations on
//! top of a [`Repository`]. Every mutation re-reads the stored record before
//! changing it.

use crate::domain::{Account, LedgerError, LedgerResult};
use crate::repository::Repository;

/// Ledger operations over an injected account store.
///
/// Missing accounts are reported as `false` (or `Ok(false)`), while
/// insufficient funds and balance queries on unknown accounts surface as
/// [`LedgerError`]s.
pub struct AccountService<R> {
    repository: R,
}

impl<R: Repository<Account>> AccountService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create an account. Returns `false` if the ID is taken.
    ///
    /// The initial balance is not validated; a negative value is stored as is.
    pub fn create_account(
        &mut self,
        account_id: &str,
        initial_balance: i64,
        owner_id: Option<&str>,
    ) -> bool {
        if self.repository.exists_by_id(account_id) {
            tracing::warn!(account_id, "Account creation rejected: ID already exists");
            return false;
        }

        let mut account = Account::new(account_id, initial_balance);
        if let Some(owner_id) = owner_id {
            account.set_owner_id(owner_id);
        }

        let saved = self.repository.save(account);
        tracing::debug!(account_id, initial_balance, ?owner_id, saved, "Account created");
        saved
    }

    pub fn delete_account(&mut self, account_id: &str) -> bool {
        let deleted = self.repository.delete(account_id);
        tracing::debug!(account_id, deleted, "Account delete requested");
        deleted
    }

    /// Look up an account. Absence is not an error here, unlike
    /// [`get_balance`](Self::get_balance).
    pub fn get_account(&self, account_id: &str) -> Option<Account> {
        self.repository.find_by_id(account_id)
    }

    pub fn get_all_accounts(&self) -> Vec<Account> {
        self.repository.find_all()
    }

    pub fn get_balance(&self, account_id: &str) -> LedgerResult<i64> {
        if !self.repository.exists_by_id(account_id) {
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }

        self.repository
            .find_by_id(account_id)
            .map(|account| account.balance())
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))
    }

    // =========================================================================
    // Monetary operations
    // =========================================================================

    /// Add `amount` to the balance.
    ///
    /// The amount is not sign-checked: a negative deposit lowers the balance
    /// without the insufficient-funds guard that `withdraw` applies.
    pub fn deposit(&mut self, account_id: &str, amount: i64) -> LedgerResult<bool> {
        let Some(mut account) = self.load(account_id) else {
            tracing::warn!(account_id, amount, "Deposit rejected: account not found");
            return Ok(false);
        };

        let balance = account
            .balance()
            .checked_add(amount)
            .ok_or_else(|| overflow(account_id))?;
        account.set_balance(balance);

        let updated = self.repository.update(account);
        tracing::debug!(account_id, amount, balance, updated, "Deposit applied");
        Ok(updated)
    }

    /// Subtract `amount` from the balance, failing with
    /// [`LedgerError::InsufficientFunds`] rather than going negative.
    pub fn withdraw(&mut self, account_id: &str, amount: i64) -> LedgerResult<bool> {
        let Some(mut account) = self.load(account_id) else {
            tracing::warn!(account_id, amount, "Withdraw rejected: account not found");
            return Ok(false);
        };

        if account.balance() < amount {
            tracing::warn!(
                account_id,
                amount,
                available = account.balance(),
                "Withdraw rejected: insufficient funds"
            );
            return Err(LedgerError::insufficient_funds(
                account_id,
                amount,
                account.balance(),
            ));
        }

        let balance = account
            .balance()
            .checked_sub(amount)
            .ok_or_else(|| overflow(account_id))?;
        account.set_balance(balance);

        let updated = self.repository.update(account);
        tracing::debug!(account_id, amount, balance, updated, "Withdraw applied");
        Ok(updated)
    }

    /// Move `amount` from one account to another.
    ///
    /// The source is checked for existence before the destination, and the
    /// destination is never looked at when the source is missing. Funds are
    /// checked before anything is written. If the destination write fails
    /// after the source write succeeded, the source record is written back
    /// and `Ok(false)` is returned.
    pub fn transfer(&mut self, from_id: &str, to_id: &str, amount: i64) -> LedgerResult<bool> {
        if !self.repository.exists_by_id(from_id) || !self.repository.exists_by_id(to_id) {
            tracing::warn!(from_id, to_id, amount, "Transfer rejected: account not found");
            return Ok(false);
        }

        let (Some(mut from), Some(mut to)) = (
            self.repository.find_by_id(from_id),
            self.repository.find_by_id(to_id),
        ) else {
            return Ok(false);
        };

        if from.balance() < amount {
            tracing::warn!(
                from_id,
                to_id,
                amount,
                available = from.balance(),
                "Transfer rejected: insufficient funds"
            );
            return Err(LedgerError::insufficient_funds(from_id, amount, from.balance()));
        }

        // Debit and credit cancel out on a single record
        if from_id == to_id {
            tracing::debug!(account_id = from_id, amount, "Self-transfer, nothing to write");
            return Ok(true);
        }

        let snapshot = from.clone();
        let from_balance = from
            .balance()
            .checked_sub(amount)
            .ok_or_else(|| overflow(from_id))?;
        let to_balance = to
            .balance()
            .checked_add(amount)
            .ok_or_else(|| overflow(to_id))?;
        from.set_balance(from_balance);
        to.set_balance(to_balance);

        if !self.repository.update(from) {
            tracing::warn!(from_id, to_id, amount, "Transfer aborted: source update failed");
            return Ok(false);
        }

        if !self.repository.update(to) {
            let restored = self.repository.update(snapshot);
            tracing::error!(
                from_id,
                to_id,
                amount,
                restored,
                "Transfer aborted: destination update failed, source rolled back"
            );
            return Ok(false);
        }

        tracing::debug!(from_id, to_id, amount, from_balance, to_balance, "Transfer applied");
        Ok(true)
    }

    /// Existence check followed by a fresh read.
    fn load(&self, account_id: &str) -> Option<Account> {
        if !self.repository.exists_by_id(account_id) {
            return None;
        }
        self.repository.find_by_id(account_id)
    }
}

fn overflow(account_id: &str) -> LedgerError {
    LedgerError::BalanceOverflow {
        account_id: account_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    fn service_with(accounts: &[(&str, i64)]) -> AccountService<InMemoryRepository<Account>> {
        AccountService::new(InMemoryRepository::with_records(
            accounts.iter().map(|(id, balance)| Account::new(*id, *balance)),
        ))
    }

    #[test]
    fn test_create_account() {
        let mut service = service_with(&[]);

        assert!(service.create_account("acc001", 1000, Some("user123")));

        let account = service.get_account("acc001").unwrap();
        assert_eq!(account.balance(), 1000);
        assert_eq!(account.owner_id(), Some("user123"));
    }

    #[test]
    fn test_create_account_duplicate_keeps_original() {
        let mut service = service_with(&[]);

        assert!(service.create_account("acc001", 1000, Some("user123")));
        assert!(!service.create_account("acc001", 2000, Some("user456")));

        let account = service.get_account("acc001").unwrap();
        assert_eq!(account.balance(), 1000);
        assert_eq!(account.owner_id(), Some("user123"));
    }

    #[test]
    fn test_create_account_accepts_negative_balance() {
        let mut service = service_with(&[]);

        assert!(service.create_account("acc001", -50, None));
        assert_eq!(service.get_balance("acc001").unwrap(), -50);
        assert!(service.get_account("acc001").unwrap().owner_id().is_none());
    }

    #[test]
    fn test_deposit_withdraw_scenario() {
        let mut service = service_with(&[]);
        service.create_account("acc001", 500, None);

        assert_eq!(service.deposit("acc001", 300), Ok(true));
        assert_eq!(service.get_balance("acc001").unwrap(), 800);

        assert_eq!(service.withdraw("acc001", 400), Ok(true));
        assert_eq!(service.get_balance("acc001").unwrap(), 400);

        let result = service.withdraw("acc001", 1000);
        assert_eq!(
            result,
            Err(LedgerError::insufficient_funds("acc001", 1000, 400))
        );
        assert_eq!(service.get_balance("acc001").unwrap(), 400);
    }

    #[test]
    fn test_deposit_negative_amount_lowers_balance() {
        let mut service = service_with(&[("acc001", 100)]);

        // Bypasses the insufficient-funds guard
        assert_eq!(service.deposit("acc001", -250), Ok(true));
        assert_eq!(service.get_balance("acc001").unwrap(), -150);
    }

    #[test]
    fn test_deposit_missing_account() {
        let mut service = service_with(&[]);
        assert_eq!(service.deposit("nope", 300), Ok(false));
        assert!(service.get_account("nope").is_none());
    }

    #[test]
    fn test_deposit_overflow() {
        let mut service = service_with(&[("acc001", i64::MAX)]);

        let result = service.deposit("acc001", 1);
        assert!(matches!(result, Err(LedgerError::BalanceOverflow { .. })));
        assert_eq!(service.get_balance("acc001").unwrap(), i64::MAX);
    }

    #[test]
    fn test_withdraw_missing_account() {
        let mut service = service_with(&[]);
        assert_eq!(service.withdraw("nope", 10), Ok(false));
    }

    #[test]
    fn test_withdraw_exact_balance() {
        let mut service = service_with(&[("acc001", 100)]);

        assert_eq!(service.withdraw("acc001", 100), Ok(true));
        assert_eq!(service.get_balance("acc001").unwrap(), 0);
    }

    #[test]
    fn test_transfer_success() {
        let mut service = service_with(&[("from1", 1000), ("to1", 500)]);

        assert_eq!(service.transfer("from1", "to1", 300), Ok(true));
        assert_eq!(service.get_balance("from1").unwrap(), 700);
        assert_eq!(service.get_balance("to1").unwrap(), 800);
    }

    #[test]
    fn test_transfer_insufficient_funds_changes_nothing() {
        let mut service = service_with(&[("from2", 1000), ("to2", 0)]);

        let result = service.transfer("from2", "to2", 2000);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds { ref account_id, requested: 2000, available: 1000 })
                if account_id == "from2"
        ));
        assert_eq!(service.get_balance("from2").unwrap(), 1000);
        assert_eq!(service.get_balance("to2").unwrap(), 0);
    }

    #[test]
    fn test_transfer_missing_accounts() {
        let mut service = service_with(&[("present", 1000)]);

        assert_eq!(service.transfer("absent", "present", 100), Ok(false));
        assert_eq!(service.transfer("present", "absent", 100), Ok(false));
        assert_eq!(service.get_balance("present").unwrap(), 1000);
    }

    #[test]
    fn test_transfer_to_same_account() {
        let mut service = service_with(&[("acc001", 500)]);

        assert_eq!(service.transfer("acc001", "acc001", 200), Ok(true));
        assert_eq!(service.get_balance("acc001").unwrap(), 500);

        let result = service.transfer("acc001", "acc001", 600);
        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
    }

    #[test]
    fn test_get_balance_vs_get_account_on_unknown_id() {
        let service = service_with(&[]);

        assert_eq!(
            service.get_balance("ghost"),
            Err(LedgerError::AccountNotFound("ghost".to_string()))
        );
        assert!(service.get_account("ghost").is_none());
    }

    #[test]
    fn test_delete_account() {
        let mut service = service_with(&[("acc001", 500)]);

        assert!(service.delete_account("acc001"));
        assert!(!service.delete_account("acc001"));
        assert!(service.get_account("acc001").is_none());
        assert_eq!(service.deposit("acc001", 10), Ok(false));
    }

    #[test]
    fn test_get_all_accounts() {
        let service = service_with(&[("acc1", 100), ("acc2", 200), ("acc3", 300)]);

        let accounts = service.get_all_accounts();
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[0].id(), "acc1");
        assert_eq!(accounts[0].balance(), 100);
    }
}
