//! Book management endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{BookResponse, RegisterBook},
};

/// Register a new book
#[utoipa::path(
    post,
    path = "/books/register",
    tag = "books",
    request_body = RegisterBook,
    responses(
        (status = 201, description = "Book registered", body = BookResponse),
        (status = 400, description = "Invalid ISBN, title or author"),
        (status = 409, description = "ISBN already registered with different title or author")
    )
)]
pub async fn register_book(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.books.register_book(request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books/all",
    tag = "books",
    responses(
        (status = 200, description = "All registered books", body = Vec<BookResponse>),
        (status = 404, description = "No books registered")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state.services.books.list_books().await?;
    Ok(Json(books))
}
