//! Domain module
//!
//! Core domain types: entities, ledger errors and request context.

pub mod account;
pub mod context;
pub mod error;
pub mod user;

pub use account::Account;
pub use context::OperationContext;
pub use error::{LedgerError, LedgerResult};
pub use user::User;
