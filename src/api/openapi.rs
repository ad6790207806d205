//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrowers, health, lending};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblion API",
        version = "0.1.0",
        description = "Library Lending Service REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::register_book,
        books::list_books,
        // Borrowers
        borrowers::register_borrower,
        // Library
        lending::borrow_book,
        lending::return_book,
    ),
    components(
        schemas(
            // Books
            crate::models::book::RegisterBook,
            crate::models::book::BookResponse,
            // Borrowers
            crate::models::borrower::RegisterBorrower,
            crate::models::borrower::BorrowerResponse,
            // Library
            lending::LendingResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book registration and catalog"),
        (name = "borrowers", description = "Borrower registration"),
        (name = "library", description = "Borrow and return operations")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
