use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{BookDataProvider, DomainError};
use crate::models::author;
use crate::models::book::{Availability, Book};
use crate::repositories::{BookFilter, NewBook, UnitOfWork};

/// Payload for creating a book.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookCreate {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(range(min = 1, max = 2100))]
    pub year_published: i32,
    #[validate(length(min = 1, max = 100))]
    pub genre: String,
    #[validate(range(min = 1, max = 50000))]
    pub num_pages: i32,
    pub availability: Availability,
    /// Ids of existing authors; must not be empty
    #[validate(length(min = 1))]
    pub authors: Vec<i32>,
}

/// Payload for updating a book. Every provided field replaces the stored
/// value wholesale; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BookUpdate {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    #[validate(range(min = 1, max = 2100))]
    pub year_published: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub genre: Option<String>,
    #[validate(range(min = 1, max = 50000))]
    pub num_pages: Option<i32>,
    pub availability: Option<Availability>,
    /// When present, fully replaces the book's author set
    #[validate(length(min = 1))]
    pub authors: Option<Vec<i32>>,
}

pub struct BookService {
    db: DatabaseConnection,
    provider: Arc<dyn BookDataProvider>,
}

impl BookService {
    pub fn new(db: DatabaseConnection, provider: Arc<dyn BookDataProvider>) -> Self {
        Self { db, provider }
    }

    pub async fn list_books(&self, filters: &BookFilter) -> Result<Vec<Book>, DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        uow.books().list(filters).await
    }

    pub async fn get_book_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        uow.books().get_by_id(id).await
    }

    pub async fn add_book(&self, data: BookCreate) -> Result<Book, DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let authors = self.resolve_authors(&uow, &data.authors).await?;

        let mut book = NewBook {
            title: data.title,
            year_published: data.year_published,
            genre: data.genre,
            num_pages: data.num_pages,
            availability: data.availability,
            description: None,
            cover_url: None,
        };

        if let Some(external) = self.provider.fetch_book_data(&book.title).await {
            book.description = external.description;
            book.cover_url = external.cover_url;
        }

        let book = uow.books().add(book, &authors).await?;
        uow.commit().await?;

        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(book)
    }

    pub async fn update_book(&self, id: i32, data: BookUpdate) -> Result<Book, DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let mut book = uow
            .books()
            .get_by_id(id)
            .await?
            .ok_or(DomainError::BookNotFound(id))?;

        // Author resolution is all-or-nothing, before anything else changes
        if let Some(ids) = &data.authors {
            let authors = self.resolve_authors(&uow, ids).await?;
            uow.books().replace_authors(id, &authors).await?;
        }

        if let Some(title) = data.title {
            book.title = title;
        }
        if let Some(year_published) = data.year_published {
            book.year_published = year_published;
        }
        if let Some(genre) = data.genre {
            book.genre = genre;
        }
        if let Some(num_pages) = data.num_pages {
            book.num_pages = num_pages;
        }
        if let Some(availability) = data.availability {
            book.availability = availability.as_str().to_string();
        }

        // Re-run enrichment against the possibly just-changed title. A
        // returned result overwrites description and cover_url field by
        // field; absence leaves them untouched.
        if let Some(external) = self.provider.fetch_book_data(&book.title).await {
            book.description = external.description;
            book.cover_url = external.cover_url;
        }

        let book = uow.books().update(&book).await?;
        uow.commit().await?;

        Ok(book)
    }

    pub async fn delete_book(&self, id: i32) -> Result<(), DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let book = uow
            .books()
            .get_by_id(id)
            .await?
            .ok_or(DomainError::BookNotFound(id))?;

        let deleted = uow.books().delete(book.id).await;
        if let Err(e) = deleted {
            tracing::error!("Failed to delete book {}: {}", id, e);
            let _ = uow.rollback().await;
            return Err(DomainError::BookDelete(id));
        }

        if let Err(e) = uow.commit().await {
            tracing::error!("Failed to delete book {}: {}", id, e);
            return Err(DomainError::BookDelete(id));
        }

        tracing::info!("Deleted book {}", id);
        Ok(())
    }

    /// Resolves author ids to stored entities, all-or-nothing: if any id is
    /// missing, fails before anything has been staged.
    async fn resolve_authors(
        &self,
        uow: &UnitOfWork,
        ids: &[i32],
    ) -> Result<Vec<author::Model>, DomainError> {
        let found = uow.authors().get_by_ids(ids).await?;
        let by_id: HashMap<i32, author::Model> = found.into_iter().map(|a| (a.id, a)).collect();

        let missing: Vec<i32> = ids
            .iter()
            .copied()
            .filter(|id| !by_id.contains_key(id))
            .collect();
        if !missing.is_empty() {
            tracing::warn!("Authors not found: {:?}", missing);
            return Err(DomainError::AuthorsNotFound(missing));
        }

        Ok(by_id.into_values().collect())
    }
}
