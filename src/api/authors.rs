use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use super::error_response;
use crate::services::author_service::{AuthorCreate, AuthorService};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/authors",
    responses(
        (status = 200, description = "All authors with their books", body = [crate::models::author::AuthorWithBooks])
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> impl IntoResponse {
    match AuthorService::new(state.db).list_authors().await {
        Ok(authors) => (StatusCode::OK, Json(authors)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = AuthorCreate,
    responses(
        (status = 201, description = "Author created", body = crate::models::Author),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(data): Json<AuthorCreate>,
) -> impl IntoResponse {
    if let Err(e) = data.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    match AuthorService::new(state.db).add_author(data).await {
        Ok(author) => (StatusCode::CREATED, Json(author)).into_response(),
        Err(e) => error_response(e),
    }
}
