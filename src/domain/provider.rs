use async_trait::async_trait;

/// Book data fetched from an external bibliographic source. Never persisted
/// on its own; merged into a book before writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalBookData {
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

/// Contract for external book lookups.
///
/// Implementations must degrade to `None` on provider failures (network,
/// timeout, bad status) instead of propagating them - enrichment must never
/// block or fail book creation/update.
#[async_trait]
pub trait BookDataProvider: Send + Sync {
    async fn fetch_book_data(&self, title: &str) -> Option<ExternalBookData>;
}
