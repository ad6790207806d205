//! In-memory store used by the service tests
//!
//! Transactions hold the single state lock from `begin` to `commit` and
//! mutate a scratch copy, so concurrent operations are serialized and an
//! uncommitted transaction leaves no trace, matching the guarantees the
//! services rely on from PostgreSQL.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    error::AppResult,
    models::{Book, BorrowRecord, Borrower, NewBook, NewBorrower},
};

use super::{Store, StoreTx};

#[derive(Debug, Default, Clone)]
struct MemoryState {
    books: Vec<Book>,
    borrowers: Vec<Borrower>,
    records: Vec<BorrowRecord>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open ledger records for a book, for invariant checks
    pub async fn active_record_count(&self, book_id: i64) -> usize {
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .filter(|r| r.book_id == book_id && r.is_active())
            .count()
    }

    /// Every ledger record ever written, open or closed
    pub async fn all_records(&self) -> Vec<BorrowRecord> {
        self.state.lock().await.records.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>> {
        let guard = self.state.clone().lock_owned().await;
        let scratch = guard.clone();
        Ok(Box::new(MemoryTx { guard, scratch }))
    }

    async fn find_book_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let state = self.state.lock().await;
        Ok(state.books.iter().find(|b| b.id == id).cloned())
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let state = self.state.lock().await;
        Ok(state.books.iter().find(|b| b.isbn == isbn).cloned())
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.state.lock().await.books.clone())
    }

    async fn save_book(&self, book: NewBook) -> AppResult<Book> {
        let mut state = self.state.lock().await;
        let book = Book {
            id: state.books.last().map(|b| b.id + 1).unwrap_or(1),
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            available: book.available,
        };
        state.books.push(book.clone());
        Ok(book)
    }

    async fn find_borrower_by_id(&self, id: i64) -> AppResult<Option<Borrower>> {
        let state = self.state.lock().await;
        Ok(state.borrowers.iter().find(|b| b.id == id).cloned())
    }

    async fn save_borrower(&self, borrower: NewBorrower) -> AppResult<Borrower> {
        let mut state = self.state.lock().await;
        let borrower = Borrower {
            id: state.borrowers.last().map(|b| b.id + 1).unwrap_or(1),
            name: borrower.name,
            email: borrower.email,
        };
        state.borrowers.push(borrower.clone());
        Ok(borrower)
    }
}

struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    scratch: MemoryState,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn find_borrower_by_id(&mut self, id: i64) -> AppResult<Option<Borrower>> {
        Ok(self.scratch.borrowers.iter().find(|b| b.id == id).cloned())
    }

    async fn find_book_for_update(&mut self, id: i64) -> AppResult<Option<Book>> {
        // The state lock held by this transaction already excludes everyone
        // else, which is as strong as a row lock.
        Ok(self.scratch.books.iter().find(|b| b.id == id).cloned())
    }

    async fn has_active_record_for_book(&mut self, book_id: i64) -> AppResult<bool> {
        Ok(self
            .scratch
            .records
            .iter()
            .any(|r| r.book_id == book_id && r.is_active()))
    }

    async fn find_active_record(
        &mut self,
        borrower_id: i64,
        book_id: i64,
    ) -> AppResult<Option<BorrowRecord>> {
        Ok(self
            .scratch
            .records
            .iter()
            .find(|r| r.borrower_id == borrower_id && r.book_id == book_id && r.is_active())
            .cloned())
    }

    async fn insert_borrow_record(
        &mut self,
        borrower_id: i64,
        book_id: i64,
        borrowed_at: DateTime<Utc>,
    ) -> AppResult<BorrowRecord> {
        let record = BorrowRecord {
            id: self.scratch.records.last().map(|r| r.id + 1).unwrap_or(1),
            borrower_id,
            book_id,
            borrowed_at,
            returned_at: None,
        };
        self.scratch.records.push(record.clone());
        Ok(record)
    }

    async fn mark_record_returned(
        &mut self,
        record_id: i64,
        returned_at: DateTime<Utc>,
    ) -> AppResult<BorrowRecord> {
        let record = self
            .scratch
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| {
                crate::error::AppError::NotFound(format!(
                    "Borrow record with id {} not found",
                    record_id
                ))
            })?;
        record.returned_at = Some(returned_at);
        Ok(record.clone())
    }

    async fn set_book_available(&mut self, book_id: i64, available: bool) -> AppResult<()> {
        let book = self
            .scratch
            .books
            .iter_mut()
            .find(|b| b.id == book_id)
            .ok_or_else(|| {
                crate::error::AppError::NotFound(format!("Book with id {} not found", book_id))
            })?;
        book.available = available;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let mut this = *self;
        *this.guard = this.scratch;
        Ok(())
    }
}
