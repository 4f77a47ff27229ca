//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, User};
use crate::error::{AppError, AppResult};

use super::{AppState, Bank};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user_id: String,
    pub default_account_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAccountRequest {
    pub account_id: String,
    #[serde(default)]
    pub initial_balance: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub account_id: String,
    #[serde(default)]
    pub initial_balance: i64,
    #[serde(default)]
    pub owner_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AmountRequest {
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub account_id: String,
    pub balance: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferResponse {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: i64,
    pub from_balance: i64,
    pub to_balance: i64,
    pub status: String,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Users
        .route("/users", post(create_user))
        .route("/users/:user_id", get(get_user))
        .route(
            "/users/:user_id/accounts",
            get(get_user_accounts).post(add_account_to_user),
        )
        // Accounts
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/:account_id",
            get(get_account).delete(delete_account),
        )
        .route("/accounts/:account_id/balance", get(get_balance))
        .route("/accounts/:account_id/deposit", post(deposit))
        .route("/accounts/:account_id/withdraw", post(withdraw))
        // Transfers
        .route("/transfers", post(transfer))
}

// =========================================================================
// Users
// =========================================================================

/// POST /users - register a user with a default account
async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreateUserResponse>)> {
    require_id("user_id", &request.user_id)?;

    let mut user = User::new(request.user_id, request.name);
    if let Some(email) = request.email {
        user = user.with_email(email);
    }
    let user_id = user.id().to_string();
    let default_account_id = user.default_account_id();

    let mut bank = state.bank.lock();

    if bank.get_user(&user_id).is_some() {
        return Err(AppError::UserExists(user_id));
    }

    if !bank.register_new_user(user) {
        // The user exists now; only the default account step can have failed
        return Err(AppError::AccountExists(default_account_id));
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            user_id,
            default_account_id,
        }),
    ))
}

/// GET /users/:user_id
async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.bank.lock().get_user(&user_id);

    user.map(Json).ok_or(AppError::UserNotFound(user_id))
}

/// GET /users/:user_id/accounts
async fn get_user_accounts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Account>>> {
    let bank = state.bank.lock();

    if bank.get_user(&user_id).is_none() {
        return Err(AppError::UserNotFound(user_id));
    }

    Ok(Json(bank.get_user_accounts(&user_id)))
}

/// POST /users/:user_id/accounts - open another account for a user
async fn add_account_to_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<OpenAccountRequest>,
) -> AppResult<(StatusCode, Json<Account>)> {
    require_id("account_id", &request.account_id)?;

    let mut bank = state.bank.lock();

    if bank.get_user(&user_id).is_none() {
        return Err(AppError::UserNotFound(user_id));
    }

    let account = Account::new(request.account_id.clone(), request.initial_balance);
    if !bank.add_account_to_user(&user_id, account) {
        return Err(AppError::AccountExists(request.account_id));
    }

    let account = stored_account(&bank, &request.account_id)?;
    Ok((StatusCode::CREATED, Json(account)))
}

// =========================================================================
// Accounts
// =========================================================================

/// POST /accounts
async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<Account>)> {
    require_id("account_id", &request.account_id)?;

    let mut bank = state.bank.lock();

    let created = bank.accounts_mut().create_account(
        &request.account_id,
        request.initial_balance,
        request.owner_id.as_deref(),
    );
    if !created {
        return Err(AppError::AccountExists(request.account_id));
    }

    let account = stored_account(&bank, &request.account_id)?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /accounts
async fn list_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    let accounts = state.bank.lock().accounts().get_all_accounts();
    Json(accounts)
}

/// GET /accounts/:account_id
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> AppResult<Json<Account>> {
    let account = state.bank.lock().get_account(&account_id);

    account.map(Json).ok_or(AppError::AccountNotFound(account_id))
}

/// DELETE /accounts/:account_id
async fn delete_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> AppResult<StatusCode> {
    if state.bank.lock().delete_account(&account_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::AccountNotFound(account_id))
    }
}

/// GET /accounts/:account_id/balance
async fn get_balance(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> AppResult<Json<BalanceResponse>> {
    let balance = state.bank.lock().accounts().get_balance(&account_id)?;

    Ok(Json(BalanceResponse {
        account_id,
        balance,
    }))
}

/// POST /accounts/:account_id/deposit
async fn deposit(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(request): Json<AmountRequest>,
) -> AppResult<Json<BalanceResponse>> {
    let mut bank = state.bank.lock();

    let applied = bank.accounts_mut().deposit(&account_id, request.amount)?;
    balance_after(&bank, account_id, applied)
}

/// POST /accounts/:account_id/withdraw
async fn withdraw(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(request): Json<AmountRequest>,
) -> AppResult<Json<BalanceResponse>> {
    let mut bank = state.bank.lock();

    let applied = bank.accounts_mut().withdraw(&account_id, request.amount)?;
    balance_after(&bank, account_id, applied)
}

// =========================================================================
// Transfers
// =========================================================================

/// POST /transfers
async fn transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> AppResult<Json<TransferResponse>> {
    let mut bank = state.bank.lock();

    let applied = bank.accounts_mut().transfer(
        &request.from_account_id,
        &request.to_account_id,
        request.amount,
    )?;

    if !applied {
        for account_id in [&request.from_account_id, &request.to_account_id] {
            if bank.get_account(account_id).is_none() {
                return Err(AppError::AccountNotFound(account_id.clone()));
            }
        }
        return Err(AppError::WriteFailed(format!(
            "transfer {} -> {}",
            request.from_account_id, request.to_account_id
        )));
    }

    let from_balance = bank.accounts().get_balance(&request.from_account_id)?;
    let to_balance = bank.accounts().get_balance(&request.to_account_id)?;

    tracing::info!(
        from = %request.from_account_id,
        to = %request.to_account_id,
        amount = request.amount,
        "Transfer completed"
    );

    Ok(Json(TransferResponse {
        from_account_id: request.from_account_id,
        to_account_id: request.to_account_id,
        amount: request.amount,
        from_balance,
        to_balance,
        status: "completed".to_string(),
    }))
}

// =========================================================================
// Helpers
// =========================================================================

fn require_id(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Read back an account that was just written
fn stored_account(bank: &Bank, account_id: &str) -> AppResult<Account> {
    bank.get_account(account_id)
        .ok_or_else(|| AppError::Internal(format!("account {} missing after write", account_id)))
}

/// Turn a deposit/withdraw outcome into a balance response
fn balance_after(bank: &Bank, account_id: String, applied: bool) -> AppResult<Json<BalanceResponse>> {
    if !applied {
        return match bank.get_account(&account_id) {
            None => Err(AppError::AccountNotFound(account_id)),
            Some(_) => Err(AppError::WriteFailed(account_id)),
        };
    }

    let balance = bank.accounts().get_balance(&account_id)?;
    Ok(Json(BalanceResponse {
        account_id,
        balance,
    }))
}
