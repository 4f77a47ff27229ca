//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{middleware as axum_middleware, Router};
use parking_lot::Mutex;
use tower_http::trace::TraceLayer;

use crate::domain::{Account, User};
use crate::repository::{InMemoryRepository, Repository};
use crate::services::{AccountService, BankService, UserService};

pub use routes::create_router;

/// Account storage behind the HTTP layer
pub type AccountStore = Box<dyn Repository<Account> + Send>;

/// The bank as served over HTTP
pub type Bank = BankService<InMemoryRepository<User>, AccountStore>;

/// Shared application state.
///
/// The ledger core is single-threaded; one mutex serialises every request's
/// access to it.
#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<Mutex<Bank>>,
    /// Hex SHA-256 of the configured API key
    pub api_key_hash: Option<String>,
}

impl AppState {
    pub fn new(bank: Bank) -> Self {
        Self {
            bank: Arc::new(Mutex::new(bank)),
            api_key_hash: None,
        }
    }

    /// State over empty in-memory stores
    pub fn in_memory() -> Self {
        Self::with_account_store(Box::new(InMemoryRepository::<Account>::new()))
    }

    /// In-memory users over the given account store
    pub fn with_account_store(accounts: AccountStore) -> Self {
        Self::new(BankService::new(
            UserService::new(InMemoryRepository::new()),
            AccountService::new(accounts),
        ))
    }

    /// Require `X-API-Key` to match `key`
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key_hash = Some(middleware::hash_api_key(key));
        self
    }
}

/// Build the application router with middleware and health check
pub fn build_app(state: AppState) -> Router {
    // Layers run last-added first: auth/context -> logging -> handler
    let api_router = create_router()
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", axum::routing::get(health_check))
        .merge(api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
