//! Account registration and credential checks

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::NewUser,
    repository::UserStore,
};

const MISSING_FIELDS: &str = "All fields are required";

#[derive(Clone)]
pub struct AccountsService {
    users: Arc<dyn UserStore>,
}

impl AccountsService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Register a new user and return its id.
    ///
    /// Usernames are unique; the store's unique index is the source of truth,
    /// so a concurrent duplicate still fails with `DuplicateUsername`.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<i32> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        }

        let user = NewUser {
            username: username.to_string(),
            password: password.to_string(),
        };
        user.validate()?;

        let id = self.users.insert(&user).await?;
        tracing::info!(user_id = id, username = %user.username, "User registered");
        Ok(id)
    }

    /// Check a login attempt and return the matching user id.
    ///
    /// Passwords are stored and compared as plaintext. Unknown usernames and
    /// wrong passwords both yield `InvalidCredentials`.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<i32> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        }

        match self.users.find_by_credentials(username, password).await? {
            Some(user) => {
                tracing::debug!(user_id = user.id, "Login succeeded");
                Ok(user.id)
            }
            None => {
                tracing::debug!(username = %username, "Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}
