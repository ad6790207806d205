//! PostgreSQL implementation of the store contract

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BorrowRecord, Borrower, NewBook, NewBorrower},
};

use super::{Store, StoreTx};

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgStoreTx { tx }))
    }

    async fn find_book_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book =
            sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1 ORDER BY id LIMIT 1")
                .bind(isbn)
                .fetch_optional(&self.pool)
                .await?;
        Ok(book)
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn save_book(&self, book: NewBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, title, author, available)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.available)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn find_borrower_by_id(&self, id: i64) -> AppResult<Option<Borrower>> {
        let borrower = sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(borrower)
    }

    async fn save_borrower(&self, borrower: NewBorrower) -> AppResult<Borrower> {
        let borrower = sqlx::query_as::<_, Borrower>(
            r#"
            INSERT INTO borrowers (name, email)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&borrower.name)
        .bind(&borrower.email)
        .fetch_one(&self.pool)
        .await?;
        Ok(borrower)
    }
}

pub struct PgStoreTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgStoreTx {
    async fn find_borrower_by_id(&mut self, id: i64) -> AppResult<Option<Borrower>> {
        let borrower = sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(borrower)
    }

    async fn find_book_for_update(&mut self, id: i64) -> AppResult<Option<Book>> {
        // The row lock serializes concurrent borrow/return attempts on the
        // same book for the rest of the transaction.
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(book)
    }

    async fn has_active_record_for_book(&mut self, book_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM borrow_records WHERE book_id = $1 AND returned_at IS NULL)",
        )
        .bind(book_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(exists)
    }

    async fn find_active_record(
        &mut self,
        borrower_id: i64,
        book_id: i64,
    ) -> AppResult<Option<BorrowRecord>> {
        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            SELECT * FROM borrow_records
            WHERE borrower_id = $1 AND book_id = $2 AND returned_at IS NULL
            "#,
        )
        .bind(borrower_id)
        .bind(book_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(record)
    }

    async fn insert_borrow_record(
        &mut self,
        borrower_id: i64,
        book_id: i64,
        borrowed_at: DateTime<Utc>,
    ) -> AppResult<BorrowRecord> {
        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrow_records (borrower_id, book_id, borrowed_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(borrower_id)
        .bind(book_id)
        .bind(borrowed_at)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(record)
    }

    async fn mark_record_returned(
        &mut self,
        record_id: i64,
        returned_at: DateTime<Utc>,
    ) -> AppResult<BorrowRecord> {
        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            UPDATE borrow_records SET returned_at = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(returned_at)
        .bind(record_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(record)
    }

    async fn set_book_available(&mut self, book_id: i64, available: bool) -> AppResult<()> {
        let result = sqlx::query("UPDATE books SET available = $1 WHERE id = $2")
            .bind(available)
            .bind(book_id)
            .execute(&mut *self.tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                book_id
            )));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
