//! Persistence layer for the lending core
//!
//! Services talk to storage through the [`Store`] contract so the business
//! rules stay independent of the backing database. [`StoreTx`] is the unit
//! of atomicity: a borrow or return performs every read and write on one
//! transaction and commits it at the end, or not at all.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{Book, BorrowRecord, Borrower, NewBook, NewBorrower},
};

pub use postgres::PgStore;

/// Storage contract consumed by the services
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a transaction for a multi-step business operation
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>>;

    async fn find_book_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// First book matching the ISBN, lowest id wins
    async fn find_book_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    async fn list_books(&self) -> AppResult<Vec<Book>>;

    async fn save_book(&self, book: NewBook) -> AppResult<Book>;

    async fn find_borrower_by_id(&self, id: i64) -> AppResult<Option<Borrower>>;

    async fn save_borrower(&self, borrower: NewBorrower) -> AppResult<Borrower>;
}

/// One storage transaction
///
/// Dropping a transaction without calling [`StoreTx::commit`] discards every
/// change made through it.
#[async_trait]
pub trait StoreTx: Send {
    async fn find_borrower_by_id(&mut self, id: i64) -> AppResult<Option<Borrower>>;

    /// Fetch a book and hold an exclusive lock on its row until the
    /// transaction ends, serializing concurrent lending operations on the
    /// same book.
    async fn find_book_for_update(&mut self, id: i64) -> AppResult<Option<Book>>;

    async fn has_active_record_for_book(&mut self, book_id: i64) -> AppResult<bool>;

    async fn find_active_record(
        &mut self,
        borrower_id: i64,
        book_id: i64,
    ) -> AppResult<Option<BorrowRecord>>;

    async fn insert_borrow_record(
        &mut self,
        borrower_id: i64,
        book_id: i64,
        borrowed_at: DateTime<Utc>,
    ) -> AppResult<BorrowRecord>;

    async fn mark_record_returned(
        &mut self,
        record_id: i64,
        returned_at: DateTime<Utc>,
    ) -> AppResult<BorrowRecord>;

    async fn set_book_available(&mut self, book_id: i64, available: bool) -> AppResult<()>;

    async fn commit(self: Box<Self>) -> AppResult<()>;
}
