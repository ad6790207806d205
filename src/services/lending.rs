//! Lending service: borrow/return orchestration
//!
//! Each operation resolves the borrower and the book, asks the ledger to
//! validate and apply the state change, and keeps the book's availability
//! flag in step with the ledger. All of it happens on one store transaction
//! so a failure at any step commits nothing.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    repository::Store,
    services::ledger,
};

#[derive(Clone)]
pub struct LendingService {
    store: Arc<dyn Store>,
}

impl LendingService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Borrow a book for a borrower
    pub async fn borrow_book(&self, borrower_id: i64, book_id: i64) -> AppResult<()> {
        tracing::debug!("Borrow requested by borrower {} for book {}", borrower_id, book_id);

        let mut tx = self.store.begin().await?;

        tx.find_borrower_by_id(borrower_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Borrower with id {} not found", borrower_id))
        })?;
        let book = tx
            .find_book_for_update(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        ledger::assert_available(tx.as_mut(), book.id).await?;
        ledger::open_loan(tx.as_mut(), borrower_id, book.id, Utc::now()).await?;

        tx.set_book_available(book.id, false).await?;
        tx.commit().await?;

        tracing::info!("Borrower {} borrowed book {}", borrower_id, book_id);
        Ok(())
    }

    /// Return a borrowed book
    pub async fn return_book(&self, borrower_id: i64, book_id: i64) -> AppResult<()> {
        tracing::debug!("Return requested by borrower {} for book {}", borrower_id, book_id);

        let mut tx = self.store.begin().await?;

        tx.find_borrower_by_id(borrower_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Borrower with id {} not found", borrower_id))
        })?;
        let book = tx
            .find_book_for_update(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        ledger::close_loan(tx.as_mut(), borrower_id, book.id, Utc::now()).await?;

        tx.set_book_available(book.id, true).await?;
        tx.commit().await?;

        tracing::info!("Borrower {} returned book {}", borrower_id, book_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{NewBook, NewBorrower},
        repository::memory::MemoryStore,
    };

    fn service(store: &Arc<MemoryStore>) -> LendingService {
        LendingService::new(store.clone())
    }

    async fn seed_borrower(store: &MemoryStore) -> i64 {
        store
            .save_borrower(NewBorrower {
                name: "Supun-San".to_string(),
                email: "supun.san@example.com".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_book(store: &MemoryStore) -> i64 {
        store
            .save_book(NewBook {
                isbn: "978-0-13-468599-1".to_string(),
                title: "Effective Java".to_string(),
                author: "Joshua Bloch".to_string(),
                available: true,
            })
            .await
            .unwrap()
            .id
    }

    /// `available == false` iff exactly one open record references the book
    async fn assert_ledger_invariant(store: &MemoryStore, book_id: i64) {
        let book = store.find_book_by_id(book_id).await.unwrap().unwrap();
        let open = store.active_record_count(book_id).await;
        if book.available {
            assert_eq!(open, 0, "available book must have no open records");
        } else {
            assert_eq!(open, 1, "borrowed book must have exactly one open record");
        }
    }

    #[tokio::test]
    async fn borrow_marks_book_unavailable_and_opens_record() {
        let store = Arc::new(MemoryStore::new());
        let borrower_id = seed_borrower(&store).await;
        let book_id = seed_book(&store).await;

        service(&store).borrow_book(borrower_id, book_id).await.unwrap();

        let book = store.find_book_by_id(book_id).await.unwrap().unwrap();
        assert!(!book.available);
        assert_eq!(store.active_record_count(book_id).await, 1);
        assert_ledger_invariant(&store, book_id).await;
    }

    #[tokio::test]
    async fn borrow_fails_for_unknown_borrower() {
        let store = Arc::new(MemoryStore::new());
        let book_id = seed_book(&store).await;

        let err = service(&store).borrow_book(42, book_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // Nothing was committed
        let book = store.find_book_by_id(book_id).await.unwrap().unwrap();
        assert!(book.available);
        assert_eq!(store.active_record_count(book_id).await, 0);
    }

    #[tokio::test]
    async fn borrow_fails_for_unknown_book() {
        let store = Arc::new(MemoryStore::new());
        let borrower_id = seed_borrower(&store).await;

        let err = service(&store).borrow_book(borrower_id, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn borrowing_twice_fails_with_already_borrowed() {
        let store = Arc::new(MemoryStore::new());
        let first = seed_borrower(&store).await;
        let second = seed_borrower(&store).await;
        let book_id = seed_book(&store).await;

        let lending = service(&store);
        lending.borrow_book(first, book_id).await.unwrap();

        let err = lending.borrow_book(first, book_id).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyBorrowed(id) if id == book_id));

        // A different borrower is rejected the same way
        let err = lending.borrow_book(second, book_id).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyBorrowed(id) if id == book_id));

        assert_eq!(store.active_record_count(book_id).await, 1);
        assert_ledger_invariant(&store, book_id).await;
    }

    #[tokio::test]
    async fn return_closes_the_loan_and_restores_availability() {
        let store = Arc::new(MemoryStore::new());
        let borrower_id = seed_borrower(&store).await;
        let book_id = seed_book(&store).await;

        let lending = service(&store);
        lending.borrow_book(borrower_id, book_id).await.unwrap();
        lending.return_book(borrower_id, book_id).await.unwrap();

        let book = store.find_book_by_id(book_id).await.unwrap().unwrap();
        assert!(book.available);
        assert_eq!(store.active_record_count(book_id).await, 0);
        assert_ledger_invariant(&store, book_id).await;

        // The closed record stays in the ledger, stamped
        let records = store.all_records().await;
        assert_eq!(records.len(), 1);
        assert!(records[0].returned_at.is_some());
    }

    #[tokio::test]
    async fn returning_without_a_borrow_fails_with_no_active_loan() {
        let store = Arc::new(MemoryStore::new());
        let borrower_id = seed_borrower(&store).await;
        let book_id = seed_book(&store).await;

        let err = service(&store)
            .return_book(borrower_id, book_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoActiveLoan { .. }));
    }

    #[tokio::test]
    async fn returning_under_the_wrong_borrower_fails_even_while_borrowed() {
        let store = Arc::new(MemoryStore::new());
        let holder = seed_borrower(&store).await;
        let other = seed_borrower(&store).await;
        let book_id = seed_book(&store).await;

        let lending = service(&store);
        lending.borrow_book(holder, book_id).await.unwrap();

        let err = lending.return_book(other, book_id).await.unwrap_err();
        assert!(matches!(err, AppError::NoActiveLoan { .. }));

        // The loan is untouched
        let book = store.find_book_by_id(book_id).await.unwrap().unwrap();
        assert!(!book.available);
        assert_eq!(store.active_record_count(book_id).await, 1);
    }

    #[tokio::test]
    async fn full_lending_cycle() {
        let store = Arc::new(MemoryStore::new());
        let borrower_id = seed_borrower(&store).await;
        let book_id = seed_book(&store).await;
        let lending = service(&store);

        lending.borrow_book(borrower_id, book_id).await.unwrap();
        assert_ledger_invariant(&store, book_id).await;

        let err = lending.borrow_book(borrower_id, book_id).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyBorrowed(_)));

        lending.return_book(borrower_id, book_id).await.unwrap();
        assert_ledger_invariant(&store, book_id).await;

        let err = lending.return_book(borrower_id, book_id).await.unwrap_err();
        assert!(matches!(err, AppError::NoActiveLoan { .. }));

        // The book can be borrowed again after the return
        lending.borrow_book(borrower_id, book_id).await.unwrap();
        assert_eq!(store.all_records().await.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_borrows_of_the_same_book_admit_only_one() {
        let store = Arc::new(MemoryStore::new());
        let first = seed_borrower(&store).await;
        let second = seed_borrower(&store).await;
        let book_id = seed_book(&store).await;
        let lending = service(&store);

        let (a, b) = tokio::join!(
            lending.borrow_book(first, book_id),
            lending.borrow_book(second, book_id)
        );

        assert_eq!(
            a.is_ok() as u8 + b.is_ok() as u8,
            1,
            "exactly one of two concurrent borrows may succeed"
        );
        assert_eq!(store.active_record_count(book_id).await, 1);
        assert_ledger_invariant(&store, book_id).await;
    }
}
