use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub year_published: i32,
    pub genre: String,
    pub num_pages: i32,
    pub availability: String,
    pub cover_url: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        super::author_book::Relation::Author.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::author_book::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lending state of a book. Stored as its wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    CheckedOut,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::CheckedOut => "checked_out",
        }
    }
}

// DTO for API responses, with authors attached
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub year_published: i32,
    pub genre: String,
    pub num_pages: i32,
    pub availability: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub authors: Vec<super::author::Author>,
    pub created_at: String,
    pub updated_at: String,
}

impl Book {
    pub fn from_model(model: Model, authors: Vec<super::author::Model>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            year_published: model.year_published,
            genre: model.genre,
            num_pages: model.num_pages,
            availability: model.availability,
            description: model.description,
            cover_url: model.cover_url,
            authors: authors.into_iter().map(super::author::Author::from).collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Reduced book shape embedded in author listings
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub title: String,
    pub year_published: i32,
    pub genre: String,
    pub num_pages: i32,
    pub availability: String,
}

impl From<Model> for BookSummary {
    fn from(model: Model) -> Self {
        Self {
            title: model.title,
            year_published: model.year_published,
            genre: model.genre,
            num_pages: model.num_pages,
            availability: model.availability,
        }
    }
}
