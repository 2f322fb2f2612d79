use std::sync::Arc;

use campus_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::User;
use crate::store::Store;

/// Read-only user lookups.
pub struct UserService<S> {
    store: Arc<S>,
}

impl<S: Store> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn exists(&self, username: &str) -> AppResult<bool> {
        self.store
            .transaction(|repo| Ok(repo.find_user_by_username(username)?.is_some()))
    }

    pub fn find(&self, username: &str) -> AppResult<User> {
        self.store.transaction(|repo| {
            repo.find_user_by_username(username)?.ok_or_else(|| {
                AppError::new(ErrorCode::UserNotFound, format!("user {username} not found"))
            })
        })
    }
}
