use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::DomainError;
use crate::models::book::{self, Availability, Book, Column, Entity as BookEntity};
use crate::models::{author, author_book};

/// Filter criteria for book queries. All provided filters are ANDed.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookFilter {
    /// Substring match on the title, case-insensitive
    pub title: Option<String>,
    /// Case-insensitive equality
    pub genre: Option<String>,
    pub availability: Option<Availability>,
    pub year_published: Option<i32>,
}

/// Column values for a book insert; id and timestamps are assigned by the
/// repository.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub year_published: i32,
    pub genre: String,
    pub num_pages: i32,
    pub availability: Availability,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

pub struct BookRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> BookRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, DomainError> {
        let mut query = BookEntity::find();

        if let Some(title) = &filter.title
            && !title.is_empty()
        {
            query = query.filter(Column::Title.contains(title));
        }

        if let Some(genre) = &filter.genre
            && !genre.is_empty()
        {
            // LIKE without wildcards: case-insensitive equality on SQLite
            query = query.filter(Column::Genre.like(genre));
        }

        if let Some(availability) = filter.availability {
            query = query.filter(Column::Availability.eq(availability.as_str()));
        }

        if let Some(year) = filter.year_published {
            query = query.filter(Column::YearPublished.eq(year));
        }

        let models = query.order_by_asc(Column::Id).all(self.conn).await?;

        let mut books = Vec::with_capacity(models.len());
        for model in models {
            let authors = model.find_related(author::Entity).all(self.conn).await?;
            books.push(Book::from_model(model, authors));
        }

        Ok(books)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let Some(model) = BookEntity::find_by_id(id).one(self.conn).await? else {
            return Ok(None);
        };

        let authors = model.find_related(author::Entity).all(self.conn).await?;
        Ok(Some(Book::from_model(model, authors)))
    }

    /// Stages a book insert together with its author associations. Durable
    /// only once the owning unit of work commits.
    pub async fn add(&self, book: NewBook, authors: &[author::Model]) -> Result<Book, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_book = book::ActiveModel {
            title: Set(book.title),
            year_published: Set(book.year_published),
            genre: Set(book.genre),
            num_pages: Set(book.num_pages),
            availability: Set(book.availability.as_str().to_string()),
            description: Set(book.description),
            cover_url: Set(book.cover_url),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = new_book.insert(self.conn).await?;

        self.link_authors(model.id, authors).await?;

        Ok(Book::from_model(model, authors.to_vec()))
    }

    /// Writes the mutable columns of the given book back to storage and
    /// refreshes `updated_at`. `id` and `created_at` are never touched.
    pub async fn update(&self, book: &Book) -> Result<Book, DomainError> {
        let model = BookEntity::find_by_id(book.id)
            .one(self.conn)
            .await?
            .ok_or(DomainError::BookNotFound(book.id))?;

        let mut active: book::ActiveModel = model.into();
        active.title = Set(book.title.clone());
        active.year_published = Set(book.year_published);
        active.genre = Set(book.genre.clone());
        active.num_pages = Set(book.num_pages);
        active.availability = Set(book.availability.clone());
        active.description = Set(book.description.clone());
        active.cover_url = Set(book.cover_url.clone());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active.update(self.conn).await?;
        let authors = updated.find_related(author::Entity).all(self.conn).await?;

        Ok(Book::from_model(updated, authors))
    }

    /// Replaces the full author set of a book.
    pub async fn replace_authors(
        &self,
        book_id: i32,
        authors: &[author::Model],
    ) -> Result<(), DomainError> {
        author_book::Entity::delete_many()
            .filter(author_book::Column::BookId.eq(book_id))
            .exec(self.conn)
            .await?;

        self.link_authors(book_id, authors).await
    }

    /// Stages the deletion of a book and its association rows.
    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        author_book::Entity::delete_many()
            .filter(author_book::Column::BookId.eq(id))
            .exec(self.conn)
            .await?;

        BookEntity::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }

    async fn link_authors(&self, book_id: i32, authors: &[author::Model]) -> Result<(), DomainError> {
        if authors.is_empty() {
            return Ok(());
        }

        let rows = authors.iter().map(|a| author_book::ActiveModel {
            author_id: Set(a.id),
            book_id: Set(book_id),
        });
        author_book::Entity::insert_many(rows).exec(self.conn).await?;

        Ok(())
    }
}
