use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub book_api_url: String,
    pub book_covers_api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://library_catalog.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5100),
            book_api_url: env::var("BOOK_API_URL")
                .unwrap_or_else(|_| "https://openlibrary.org".to_string()),
            book_covers_api_url: env::var("BOOK_COVERS_API_URL")
                .unwrap_or_else(|_| "https://covers.openlibrary.org".to_string()),
        }
    }
}
