use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::DomainError;
use crate::models::author::{self, AuthorWithBooks, Column, Entity as AuthorEntity};
use crate::models::book;

pub struct AuthorRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> AuthorRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<AuthorWithBooks>, DomainError> {
        let models = AuthorEntity::find()
            .order_by_asc(Column::Id)
            .all(self.conn)
            .await?;

        let mut authors = Vec::with_capacity(models.len());
        for model in models {
            let books = model.find_related(book::Entity).all(self.conn).await?;
            authors.push(AuthorWithBooks::from_model(model, books));
        }

        Ok(authors)
    }

    /// Returns only the authors whose ids exist; callers detect missing ids
    /// themselves.
    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<author::Model>, DomainError> {
        let authors = AuthorEntity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(self.conn)
            .await?;

        Ok(authors)
    }

    /// Stages an author insert; durable once the unit of work commits.
    pub async fn add(
        &self,
        first_name: String,
        last_name: String,
    ) -> Result<author::Model, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_author = author::ActiveModel {
            first_name: Set(first_name),
            last_name: Set(last_name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(new_author.insert(self.conn).await?)
    }
}
