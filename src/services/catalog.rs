//! Catalog browsing, renting and buying

use std::sync::Arc;

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{current_year, MIN_YEAR},
        Book, BookAction, BookFilter, BookQuery, NewBook,
    },
    repository::BookStore,
};

const BOOK_NOT_FOUND: &str = "Book not found";
const INVALID_YEAR: &str = "Invalid year filter";

/// Build a catalog filter from optional query parameters.
/// Empty values are treated as absent.
pub fn build_filter(author: Option<&str>, genre: Option<&str>, year: Option<&str>) -> AppResult<BookFilter> {
    build_filter_for_year(author, genre, year, current_year())
}

/// Same as [`build_filter`] with an explicit upper bound for the year
pub fn build_filter_for_year(
    author: Option<&str>,
    genre: Option<&str>,
    year: Option<&str>,
    current_year: i32,
) -> AppResult<BookFilter> {
    let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);

    let year = match year.filter(|s| !s.is_empty()) {
        Some(raw) => {
            let parsed: i32 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::InvalidFilter(INVALID_YEAR.to_string()))?;
            if !(MIN_YEAR..=current_year).contains(&parsed) {
                return Err(AppError::InvalidFilter(INVALID_YEAR.to_string()));
            }
            Some(parsed)
        }
        None => None,
    };

    Ok(BookFilter {
        author: present(author),
        genre: present(genre),
        year,
    })
}

/// The three demonstration books inserted into an empty catalog
pub fn demo_books() -> Vec<NewBook> {
    [
        ("Book 1", "Author 1", "Fiction", 2020, 10),
        ("Book 2", "Author 2", "Non-Fiction", 2018, 15),
        ("Book 3", "Author 3", "Science", 2022, 20),
    ]
    .into_iter()
    .map(|(title, author, genre, year, price)| NewBook {
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
        year,
        is_available: true,
        price: Decimal::new(price, 0),
    })
    .collect()
}

#[derive(Clone)]
pub struct CatalogService {
    books: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// List books matching the query
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let filter = build_filter(
            query.author.as_deref(),
            query.genre.as_deref(),
            query.year.as_deref(),
        )?;
        self.books.find(&filter).await
    }

    /// Get a single book
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    /// Apply `rent` or `buy` to a book.
    ///
    /// Existence is checked before the action name, so any action on a
    /// missing book reports `NotFound`. Buying ignores rental state.
    pub async fn apply_action(&self, book_id: i32, action: &str) -> AppResult<BookAction> {
        let book = self.get_book(book_id).await?;
        let action: BookAction = action.parse()?;

        match action {
            BookAction::Rent => {
                if !book.is_available {
                    return Err(AppError::AlreadyRented);
                }
                if !self.books.mark_rented(book_id).await? {
                    // Lost a race: someone rented or bought it in between.
                    return match self.books.get_by_id(book_id).await? {
                        Some(_) => Err(AppError::AlreadyRented),
                        None => Err(AppError::NotFound(BOOK_NOT_FOUND.to_string())),
                    };
                }
                tracing::info!(book_id, title = %book.title, "Book rented");
            }
            BookAction::Buy => {
                if !self.books.delete(book_id).await? {
                    return Err(AppError::NotFound(BOOK_NOT_FOUND.to_string()));
                }
                tracing::info!(
                    book_id,
                    title = %book.title,
                    was_available = book.is_available,
                    "Book bought and removed from catalog"
                );
            }
        }

        Ok(action)
    }

    /// Insert the demonstration books if the catalog is empty.
    /// Returns the number of books inserted.
    pub async fn seed_demo_books(&self) -> AppResult<u64> {
        let existing = self.books.count().await?;
        if existing > 0 {
            tracing::debug!(existing, "Catalog already populated, skipping seed");
            return Ok(0);
        }

        let books = demo_books();
        for book in &books {
            book.validate()?;
        }

        let inserted = self.books.insert_many(&books).await?;
        tracing::info!(inserted, "Seeded demonstration books");
        Ok(inserted)
    }

    /// Check that the catalog store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.books.ping().await
    }
}
