use utoipa::OpenApi;

use crate::api;
use crate::models::author::{Author, AuthorWithBooks};
use crate::models::book::{Availability, Book, BookSummary};
use crate::services::author_service::AuthorCreate;
use crate::services::book_service::{BookCreate, BookUpdate};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
        api::authors::list_authors,
        api::authors::create_author,
    ),
    components(
        schemas(
            Book,
            BookSummary,
            Availability,
            Author,
            AuthorWithBooks,
            BookCreate,
            BookUpdate,
            AuthorCreate,
        )
    ),
    tags(
        (name = "library-catalog", description = "Book and author catalog API")
    )
)]
pub struct ApiDoc;
