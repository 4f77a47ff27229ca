//! Common test utilities

#![allow(dead_code)]

use std::collections::HashSet;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use bank_ledger::api::{self, AppState};
use bank_ledger::{Account, InMemoryRepository, Repository};

pub const TEST_API_KEY: &str = "test_key_123";

/// App over empty in-memory stores, no authentication
pub fn setup_app() -> Router {
    api::build_app(AppState::in_memory())
}

/// App over empty in-memory stores requiring `TEST_API_KEY`
pub fn setup_app_with_auth() -> Router {
    api::build_app(AppState::in_memory().with_api_key(TEST_API_KEY))
}

/// App whose account store rejects every update to the given accounts
pub fn setup_app_with_failing_updates(account_ids: &[&str]) -> Router {
    let store = FailingUpdateStore {
        inner: InMemoryRepository::new(),
        failing: account_ids.iter().map(|id| id.to_string()).collect(),
    };
    api::build_app(AppState::with_account_store(Box::new(store)))
}

/// Account store that refuses `update` for selected IDs
struct FailingUpdateStore {
    inner: InMemoryRepository<Account>,
    failing: HashSet<String>,
}

impl Repository<Account> for FailingUpdateStore {
    fn exists_by_id(&self, id: &str) -> bool {
        self.inner.exists_by_id(id)
    }

    fn find_by_id(&self, id: &str) -> Option<Account> {
        self.inner.find_by_id(id)
    }

    fn save(&mut self, entity: Account) -> bool {
        self.inner.save(entity)
    }

    fn update(&mut self, entity: Account) -> bool {
        if self.failing.contains(entity.id()) {
            return false;
        }
        self.inner.update(entity)
    }

    fn delete(&mut self, id: &str) -> bool {
        self.inner.delete(id)
    }

    fn find_all(&self) -> Vec<Account> {
        self.inner.find_all()
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request and decode the JSON body (Null when empty)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn create_account(app: &Router, account_id: &str, balance: i64) {
    let body = serde_json::json!({ "account_id": account_id, "initial_balance": balance });
    let (status, _) = send(app, json_request("POST", "/accounts", &body)).await;
    assert_eq!(status, StatusCode::CREATED, "account {} creation failed", account_id);
}

pub async fn balance_of(app: &Router, account_id: &str) -> i64 {
    let uri = format!("/accounts/{}/balance", account_id);
    let (status, json) = send(app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::OK, "balance of {} failed", account_id);
    json["balance"].as_i64().unwrap()
}
