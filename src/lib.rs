//! bank_ledger Library
//!
//! In-process banking ledger: accounts, users, and the HTTP surface over them.

pub mod api;
pub mod domain;
pub mod repository;
pub mod services;

pub mod config;
mod error;

pub use config::Config;
pub use domain::{Account, LedgerError, LedgerResult, OperationContext, User};
pub use error::{AppError, AppResult};
pub use repository::{Entity, InMemoryRepository, Repository};
pub use services::{AccountService, BankService, UserService};
