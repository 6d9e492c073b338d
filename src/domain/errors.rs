//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// One or more referenced author ids do not exist
    AuthorsNotFound(Vec<i32>),
    /// Referenced book id does not exist
    BookNotFound(i32),
    /// Delete was attempted against an existing book and failed; the
    /// transaction has already been rolled back
    BookDelete(i32),
    /// Database/persistence error
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::AuthorsNotFound(ids) => {
                let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                write!(f, "Authors not found: {}", ids.join(", "))
            }
            DomainError::BookNotFound(id) => write!(f, "Book {} not found", id),
            DomainError::BookDelete(id) => write!(f, "Failed to delete book {}", id),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in the repository layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
