//! Business logic services

pub mod books;
pub mod borrowers;
pub mod ledger;
pub mod lending;

use std::sync::Arc;

use crate::repository::Store;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub borrowers: borrowers::BorrowersService,
    pub lending: lending::LendingService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            books: books::BooksService::new(store.clone()),
            borrowers: borrowers::BorrowersService::new(store.clone()),
            lending: lending::LendingService::new(store),
        }
    }
}
