//! Data models for Biblion

pub mod book;
pub mod borrow_record;
pub mod borrower;

// Re-export commonly used types
pub use book::{Book, BookResponse, NewBook, RegisterBook};
pub use borrow_record::BorrowRecord;
pub use borrower::{Borrower, BorrowerResponse, NewBorrower, RegisterBorrower};
