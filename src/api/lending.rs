//! Lending endpoints: borrow and return

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Outcome message for lending operations
#[derive(Serialize, ToSchema)]
pub struct LendingResponse {
    pub message: String,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/library/borrow/{borrower_id}/{book_id}",
    tag = "library",
    params(
        ("borrower_id" = i64, Path, description = "Borrower ID"),
        ("book_id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book borrowed", body = LendingResponse),
        (status = 404, description = "Borrower or book not found"),
        (status = 409, description = "Book is already borrowed")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Path((borrower_id, book_id)): Path<(i64, i64)>,
) -> AppResult<Json<LendingResponse>> {
    state
        .services
        .lending
        .borrow_book(borrower_id, book_id)
        .await?;

    Ok(Json(LendingResponse {
        message: "Book borrowed successfully".to_string(),
    }))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/library/return/{borrower_id}/{book_id}",
    tag = "library",
    params(
        ("borrower_id" = i64, Path, description = "Borrower ID"),
        ("book_id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = LendingResponse),
        (status = 404, description = "Borrower or book not found"),
        (status = 409, description = "No active loan for this borrower and book")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path((borrower_id, book_id)): Path<(i64, i64)>,
) -> AppResult<Json<LendingResponse>> {
    state
        .services
        .lending
        .return_book(borrower_id, book_id)
        .await?;

    Ok(Json(LendingResponse {
        message: "Book returned successfully".to_string(),
    }))
}
