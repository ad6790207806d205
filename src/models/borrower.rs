//! Borrower model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Borrower model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Borrower {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Fields for a borrower that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewBorrower {
    pub name: String,
    pub email: String,
}

/// Register borrower request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterBorrower {
    /// Borrower name: letters, spaces, hyphens and apostrophes
    #[schema(example = "Supun-San")]
    #[validate(custom(function = "crate::validation::person_name"))]
    pub name: String,
    /// Contact email address
    #[schema(example = "supun.san@example.com")]
    #[validate(
        length(min = 1, message = "must not be blank"),
        email(message = "must be a valid email address")
    )]
    pub email: String,
}

/// Borrower details exposed to API clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<Borrower> for BorrowerResponse {
    fn from(borrower: Borrower) -> Self {
        Self {
            id: borrower.id,
            name: borrower.name,
            email: borrower.email,
        }
    }
}
