use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        super::author_book::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::author_book::Relation::Author.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<Model> for Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

/// Author with their books attached, for the author listing
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AuthorWithBooks {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub books: Vec<super::book::BookSummary>,
}

impl AuthorWithBooks {
    pub fn from_model(model: Model, books: Vec<super::book::Model>) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            books: books.into_iter().map(super::book::BookSummary::from).collect(),
        }
    }
}
