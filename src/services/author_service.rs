use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::DomainError;
use crate::models::author::{Author, AuthorWithBooks};
use crate::repositories::UnitOfWork;

/// Payload for creating an author.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AuthorCreate {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
}

pub struct AuthorService {
    db: DatabaseConnection,
}

impl AuthorService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_authors(&self) -> Result<Vec<AuthorWithBooks>, DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        uow.authors().list().await
    }

    pub async fn add_author(&self, data: AuthorCreate) -> Result<Author, DomainError> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let author = uow.authors().add(data.first_name, data.last_name).await?;
        uow.commit().await?;

        Ok(Author::from(author))
    }
}
