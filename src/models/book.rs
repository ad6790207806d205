//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
///
/// `available` is redundant with the borrow ledger (a book is unavailable
/// exactly when it has an open borrow record) and is kept in sync by the
/// lending service inside the same transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub available: bool,
}

/// Fields for a book that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub available: bool,
}

/// Register book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterBook {
    /// ISBN-10 or ISBN-13, hyphens and spaces allowed
    #[schema(example = "978-0-13-468599-1")]
    #[validate(custom(function = "crate::validation::isbn"))]
    pub isbn: String,
    /// Title of the book
    #[schema(example = "The Pragmatic Programmer")]
    #[validate(length(min = 2, max = 100, message = "must be between 2 and 100 characters"))]
    pub title: String,
    /// Author name: letters, spaces, hyphens and apostrophes
    #[schema(example = "Supun-San")]
    #[validate(custom(function = "crate::validation::person_name"))]
    pub author: String,
}

/// Book details exposed to API clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookResponse {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    /// Whether the book can currently be borrowed
    pub available: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            available: book.available,
        }
    }
}
