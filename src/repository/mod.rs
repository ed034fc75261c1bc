//! Repository layer for database operations
//!
//! Services talk to storage through the [`UserStore`] and [`BookStore`]
//! traits; the PostgreSQL implementations share one connection pool.

pub mod books;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookFilter, NewBook, NewUser, User},
};

/// Persistent user collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, failing with `DuplicateUsername` when the username is taken
    async fn insert(&self, user: &NewUser) -> AppResult<i32>;

    /// Find the user whose username and password both match exactly
    async fn find_by_credentials(&self, username: &str, password: &str) -> AppResult<Option<User>>;
}

/// Persistent book collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books matching the filter
    async fn find(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Set `is_available = false` only if the book exists and is still available.
    /// Returns whether a row was updated.
    async fn mark_rented(&self, id: i32) -> AppResult<bool>;

    /// Returns whether a row was deleted
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;

    /// Returns the number of inserted rows
    async fn insert_many(&self, books: &[NewBook]) -> AppResult<u64>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the store handles
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool)),
        }
    }

    /// Build a repository over arbitrary store implementations
    pub fn with_stores(users: Arc<dyn UserStore>, books: Arc<dyn BookStore>) -> Self {
        Self { users, books }
    }
}
