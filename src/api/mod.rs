pub mod authors;
pub mod books;
pub mod health;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::domain::DomainError;
use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Authors
        .route(
            "/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .with_state(state)
}

pub(crate) fn error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::AuthorsNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::BookNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::BookDelete(_) | DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
