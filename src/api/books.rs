//! Catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::extractor::AppQuery;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookAction, BookQuery},
    AppState,
};

/// Result of a rent or buy
#[derive(Serialize, ToSchema)]
pub struct ActionResponse {
    /// Book ID
    pub id: i32,
    pub action: BookAction,
    pub message: String,
}

/// Ids that do not parse cannot exist in the catalog
fn parse_book_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::NotFound("Book not found".to_string()))
}

/// List the catalog with optional exact-match filters
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("author" = Option<String>, Query, description = "Exact author"),
        ("genre" = Option<String>, Query, description = "Exact genre"),
        ("year" = Option<String>, Query, description = "Publication year, 1500 to current year")
    ),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "Invalid year filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books(&query).await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let id = parse_book_id(&id)?;
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Rent or buy a book
#[utoipa::path(
    post,
    path = "/books/{id}/{action}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID"),
        ("action" = String, Path, description = "`rent` or `buy`")
    ),
    responses(
        (status = 200, description = "Action applied", body = ActionResponse),
        (status = 400, description = "Invalid action", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is already rented", body = crate::error::ErrorResponse)
    )
)]
pub async fn apply_action(
    State(state): State<AppState>,
    Path((id, action)): Path<(String, String)>,
) -> AppResult<Json<ActionResponse>> {
    let id = parse_book_id(&id)?;
    let action = state.services.catalog.apply_action(id, &action).await?;

    let message = match action {
        BookAction::Rent => "Book rented",
        BookAction::Buy => "Book purchased",
    };

    Ok(Json(ActionResponse {
        id,
        action,
        message: message.to_string(),
    }))
}
