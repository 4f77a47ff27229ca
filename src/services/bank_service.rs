//! Bank Service
//!
//! Orchestrates users and accounts: registration with a default account,
//! routing accounts to their owners.

use crate::domain::{Account, User};
use crate::repository::Repository;

use super::{AccountService, UserService};

/// Facade composing user management with the ledger core.
pub struct BankService<U, A> {
    users: UserService<U>,
    accounts: AccountService<A>,
}

impl<U, A> BankService<U, A>
where
    U: Repository<User>,
    A: Repository<Account>,
{
    pub fn new(users: UserService<U>, accounts: AccountService<A>) -> Self {
        Self { users, accounts }
    }

    /// Ledger core, for balance queries
    pub fn accounts(&self) -> &AccountService<A> {
        &self.accounts
    }

    /// Ledger core, for monetary operations
    pub fn accounts_mut(&mut self) -> &mut AccountService<A> {
        &mut self.accounts
    }

    pub fn users(&self) -> &UserService<U> {
        &self.users
    }

    /// Register a user and open their zero-balance default account.
    ///
    /// The user stays registered if the default account cannot be created.
    pub fn register_new_user(&mut self, user: User) -> bool {
        let user_id = user.id().to_string();
        let default_account_id = user.default_account_id();

        if !self.users.create_user(user) {
            return false;
        }

        let created = self
            .accounts
            .create_account(&default_account_id, 0, Some(&user_id));
        if !created {
            tracing::warn!(
                %user_id,
                account_id = %default_account_id,
                "User registered without default account"
            );
            return false;
        }

        tracing::info!(%user_id, account_id = %default_account_id, "User registered");
        true
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get_user(user_id)
    }

    /// Every account owned by the user.
    pub fn get_user_accounts(&self, user_id: &str) -> Vec<Account> {
        self.accounts
            .get_all_accounts()
            .into_iter()
            .filter(|account| account.is_owned_by(user_id))
            .collect()
    }

    /// Open `account` for an existing user, overriding its owner.
    pub fn add_account_to_user(&mut self, user_id: &str, mut account: Account) -> bool {
        if self.users.get_user(user_id).is_none() {
            tracing::warn!(user_id, "Account not added: user not found");
            return false;
        }

        if self.accounts.get_account(account.id()).is_some() {
            tracing::warn!(user_id, account_id = account.id(), "Account not added: ID already exists");
            return false;
        }

        account.set_owner_id(user_id);
        self.accounts
            .create_account(account.id(), account.balance(), account.owner_id())
    }

    pub fn get_account(&self, account_id: &str) -> Option<Account> {
        self.accounts.get_account(account_id)
    }

    pub fn delete_account(&mut self, account_id: &str) -> bool {
        self.accounts.delete_account(account_id)
    }
}
