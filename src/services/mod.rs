//! Services module
//!
//! The ledger core (`AccountService`), user management, and the
//! orchestration facade that composes them.

mod account_service;
mod bank_service;
mod user_service;


pub use account_service::AccountService;
pub use bank_service::BankService;
pub use user_service::UserService;
