//! Book (catalog entry) model, catalog filters and book actions

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Earliest publication year accepted in the catalog
pub const MIN_YEAR: i32 = 1500;

/// Current calendar year (UTC), upper bound for publication years
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Book as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i32,
    pub is_available: bool,
    #[schema(value_type = String, example = "10")]
    pub price: Decimal,
}

/// Book to be inserted (seed data)
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    #[validate(custom(function = "validate_publication_year"))]
    pub year: i32,
    pub is_available: bool,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

fn range_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_publication_year(year: i32) -> Result<(), ValidationError> {
    if year < MIN_YEAR {
        return Err(range_error("year_range", "Year must be after 1500"));
    }
    if year > current_year() {
        return Err(range_error("year_range", "Year cannot be in the future"));
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(range_error("price_range", "Price cannot be negative"));
    }
    Ok(())
}

/// Catalog query parameters (API). `year` stays a string so malformed
/// values can be reported as an invalid filter.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct BookQuery {
    pub author: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
}

/// Validated set of exact-match constraints applied to a catalog listing.
/// `None` fields impose no constraint.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookFilter {
    pub author: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.genre.is_none() && self.year.is_none()
    }

    /// Exact, case-sensitive match on every constrained field
    pub fn matches(&self, book: &Book) -> bool {
        self.author.as_ref().map_or(true, |a| *a == book.author)
            && self.genre.as_ref().map_or(true, |g| *g == book.genre)
            && self.year.map_or(true, |y| y == book.year)
    }
}

/// Action a caller can apply to a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookAction {
    /// Mark the book unavailable
    Rent,
    /// Remove the book from the catalog
    Buy,
}

impl BookAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookAction::Rent => "rent",
            BookAction::Buy => "buy",
        }
    }
}

impl std::fmt::Display for BookAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rent" => Ok(BookAction::Rent),
            "buy" => Ok(BookAction::Buy),
            other => Err(AppError::InvalidAction(other.to_string())),
        }
    }
}
