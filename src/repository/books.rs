//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::BookStore;
use crate::{
    error::AppResult,
    models::{Book, BookFilter, NewBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, title, author, genre, year, is_available, price FROM books WHERE 1=1",
        );

        if let Some(ref author) = filter.author {
            query.push(" AND author = ").push_bind(author);
        }
        if let Some(ref genre) = filter.genre {
            query.push(" AND genre = ").push_bind(genre);
        }
        if let Some(year) = filter.year {
            query.push(" AND year = ").push_bind(year);
        }
        query.push(" ORDER BY id");

        let books = query
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, genre, year, is_available, price FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn mark_rented(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE books SET is_available = FALSE WHERE id = $1 AND is_available = TRUE",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_many(&self, books: &[NewBook]) -> AppResult<u64> {
        if books.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO books (title, author, genre, year, is_available, price) ",
        );
        query.push_values(books, |mut row, book| {
            row.push_bind(&book.title)
                .push_bind(&book.author)
                .push_bind(&book.genre)
                .push_bind(book.year)
                .push_bind(book.is_available)
                .push_bind(book.price);
        });

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
