//! Data models for Lendshelf

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookAction, BookFilter, BookQuery, NewBook};
pub use user::{Credentials, NewUser, User};
