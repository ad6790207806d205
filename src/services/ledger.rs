//! Loan ledger operations
//!
//! The ledger is the append-only set of borrow records and guards the rule
//! that a book has at most one active loan. Every operation runs on a
//! caller-owned transaction; callers are expected to hold the book row lock
//! (see `StoreTx::find_book_for_update`) so the check in
//! [`assert_available`] cannot race a concurrent borrow.

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::BorrowRecord,
    repository::StoreTx,
};

/// Fail with `AlreadyBorrowed` if the book has an open borrow record
pub async fn assert_available(tx: &mut dyn StoreTx, book_id: i64) -> AppResult<()> {
    if tx.has_active_record_for_book(book_id).await? {
        return Err(AppError::AlreadyBorrowed(book_id));
    }
    Ok(())
}

/// Open a loan: append a record with no return timestamp
pub async fn open_loan(
    tx: &mut dyn StoreTx,
    borrower_id: i64,
    book_id: i64,
    now: DateTime<Utc>,
) -> AppResult<BorrowRecord> {
    tx.insert_borrow_record(borrower_id, book_id, now).await
}

/// Close the active loan held by this exact borrower on this book
///
/// Returning under the wrong borrower id is rejected with `NoActiveLoan`
/// even when the book is borrowed by someone else.
pub async fn close_loan(
    tx: &mut dyn StoreTx,
    borrower_id: i64,
    book_id: i64,
    now: DateTime<Utc>,
) -> AppResult<BorrowRecord> {
    let record = tx
        .find_active_record(borrower_id, book_id)
        .await?
        .ok_or(AppError::NoActiveLoan {
            borrower_id,
            book_id,
        })?;

    tx.mark_record_returned(record.id, now).await
}
