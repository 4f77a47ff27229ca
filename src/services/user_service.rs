//! User Service
//!
//! User registration and lookup over a [`Repository`].

use crate::domain::User;
use crate::repository::Repository;

/// User management over an injected user store.
pub struct UserService<R> {
    repository: R,
}

impl<R: Repository<User>> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Store a new user. Returns `false` if the ID is taken.
    pub fn create_user(&mut self, user: User) -> bool {
        if self.repository.exists_by_id(user.id()) {
            tracing::warn!(user_id = user.id(), "User creation rejected: ID already exists");
            return false;
        }

        let user_id = user.id().to_string();
        let saved = self.repository.save(user);
        tracing::debug!(%user_id, saved, "User created");
        saved
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.repository.find_by_id(user_id)
    }

    pub fn get_all_users(&self) -> Vec<User> {
        self.repository.find_all()
    }
}
