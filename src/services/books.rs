//! Book registration and catalog service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{BookResponse, NewBook, RegisterBook},
    repository::Store,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn Store>,
}

impl BooksService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a new book
    ///
    /// A duplicate ISBN is accepted only when title and author match the
    /// already registered book; the new row is an independently lendable
    /// copy. A duplicate ISBN under different metadata is a conflict.
    pub async fn register_book(&self, request: RegisterBook) -> AppResult<BookResponse> {
        request.validate()?;

        if let Some(existing) = self.store.find_book_by_isbn(&request.isbn).await? {
            if existing.title != request.title || existing.author != request.author {
                return Err(AppError::Conflict(format!(
                    "ISBN {} is already registered with a different title or author",
                    request.isbn
                )));
            }
        }

        let book = self
            .store
            .save_book(NewBook {
                isbn: request.isbn,
                title: request.title,
                author: request.author,
                available: true,
            })
            .await?;

        tracing::info!("Registered book {} ({})", book.id, book.isbn);
        Ok(book.into())
    }

    /// List all registered books
    ///
    /// An empty catalog is reported as `NotFound` rather than an empty list.
    pub async fn list_books(&self) -> AppResult<Vec<BookResponse>> {
        let books = self.store.list_books().await?;
        if books.is_empty() {
            return Err(AppError::NotFound("No books registered".to_string()));
        }
        Ok(books.into_iter().map(BookResponse::from).collect())
    }
}
