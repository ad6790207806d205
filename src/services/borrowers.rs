//! Borrower registration service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppResult,
    models::{BorrowerResponse, NewBorrower, RegisterBorrower},
    repository::Store,
};

#[derive(Clone)]
pub struct BorrowersService {
    store: Arc<dyn Store>,
}

impl BorrowersService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a new borrower
    pub async fn register_borrower(&self, request: RegisterBorrower) -> AppResult<BorrowerResponse> {
        request.validate()?;

        let borrower = self
            .store
            .save_borrower(NewBorrower {
                name: request.name,
                email: request.email,
            })
            .await?;

        tracing::info!("Registered borrower {}", borrower.id);
        Ok(borrower.into())
    }
}
