//! User entity
//!
//! Profile data for an account holder. Users own accounts through
//! `Account::owner_id`; the user record itself holds no balance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::Entity;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    id: String,

    /// Display name
    name: String,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,

    /// When the user record was built
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// ID of the account created for this user at registration.
    pub fn default_account_id(&self) -> String {
        format!("default_{}", self.id)
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}
