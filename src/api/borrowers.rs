//! Borrower management endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{BorrowerResponse, RegisterBorrower},
};

/// Register a new borrower
#[utoipa::path(
    post,
    path = "/borrowers/register",
    tag = "borrowers",
    request_body = RegisterBorrower,
    responses(
        (status = 201, description = "Borrower registered", body = BorrowerResponse),
        (status = 400, description = "Invalid name or email")
    )
)]
pub async fn register_borrower(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterBorrower>,
) -> AppResult<(StatusCode, Json<BorrowerResponse>)> {
    let borrower = state.services.borrowers.register_borrower(request).await?;
    Ok((StatusCode::CREATED, Json(borrower)))
}
