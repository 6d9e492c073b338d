//! Application state shared across all handlers

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::BookDataProvider;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub provider: Arc<dyn BookDataProvider>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, provider: Arc<dyn BookDataProvider>) -> Self {
        Self { db, provider }
    }
}
