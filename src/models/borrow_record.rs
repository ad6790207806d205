//! Borrow record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry in the append-only borrow ledger
///
/// A record with no `returned_at` timestamp is an active loan. Closing a
/// loan stamps the record; records are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BorrowRecord {
    pub id: i64,
    pub borrower_id: i64,
    pub book_id: i64,
    pub borrowed_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    /// An active record is one whose book has not been returned yet
    pub fn is_active(&self) -> bool {
        self.returned_at.is_none()
    }
}
