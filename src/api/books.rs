use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use super::error_response;
use crate::repositories::BookFilter;
use crate::services::book_service::{BookCreate, BookService, BookUpdate};
use crate::state::AppState;

fn book_service(state: AppState) -> BookService {
    BookService::new(state.db, state.provider)
}

#[utoipa::path(
    get,
    path = "/api/books",
    params(BookFilter),
    responses(
        (status = 200, description = "Books matching the filters", body = [crate::models::Book])
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(filters): Query<BookFilter>,
) -> impl IntoResponse {
    match book_service(state).list_books(&filters).await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = crate::models::Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match book_service(state).get_book_by_id(id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(book)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Book {} not found", id) })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookCreate,
    responses(
        (status = 201, description = "Book created", body = crate::models::Book),
        (status = 422, description = "Invalid payload or unresolved author ids")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(data): Json<BookCreate>,
) -> impl IntoResponse {
    if let Err(e) = data.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    match book_service(state).add_book(data).await {
        Ok(book) => (StatusCode::CREATED, Json(book)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    request_body = BookUpdate,
    responses(
        (status = 200, description = "Book updated", body = crate::models::Book),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Invalid payload or unresolved author ids")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<BookUpdate>,
) -> impl IntoResponse {
    if let Err(e) = data.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    match book_service(state).update_book(id, data).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Delete failed")
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match book_service(state).delete_book(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
