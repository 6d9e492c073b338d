use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::{BookDataProvider, ExternalBookData};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const COVER_SIZE: &str = "L";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(default)]
    title: String,
    key: Option<String>,
    cover_i: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WorkResponse {
    description: Option<WorkDescription>,
}

// The works API returns the description either as a bare string or as a
// {"type": "/type/text", "value": ...} object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkDescription {
    Text(String),
    Typed { value: String },
}

impl WorkDescription {
    fn into_text(self) -> String {
        match self {
            WorkDescription::Text(text) => text,
            WorkDescription::Typed { value } => value,
        }
    }
}

/// Client for the OpenLibrary search, works and covers endpoints.
pub struct OpenLibraryClient {
    client: reqwest::Client,
    base_url: String,
    covers_url: String,
}

impl OpenLibraryClient {
    pub fn new(base_url: &str, covers_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            covers_url: covers_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search by title and return the first exact (case-insensitive) match.
    async fn search_book(&self, title: &str) -> Option<SearchDoc> {
        let url = format!(
            "{}/search.json?q={}",
            self.base_url,
            urlencoding::encode(title)
        );
        let response: SearchResponse = self.get_json(&url).await?;

        let wanted = title.to_lowercase();
        response
            .docs
            .into_iter()
            .find(|doc| doc.title.to_lowercase() == wanted)
    }

    /// Fetch the long-form description for a work key like "/works/OL82563W"
    async fn get_description(&self, key: &str) -> Option<String> {
        let url = format!("{}/{}.json", self.base_url, key.trim_start_matches('/'));
        let work: WorkResponse = self.get_json(&url).await?;
        work.description.map(WorkDescription::into_text)
    }

    fn cover_url(&self, cover_id: i64, size: &str) -> String {
        format!("{}/b/id/{}-{}.jpg", self.covers_url, cover_id, size)
    }

    // All transport and decode failures are logged and collapse to None
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("Request to {} failed: {}", url, e);
                return None;
            }
        };

        if !resp.status().is_success() {
            tracing::warn!("Request to {} returned status {}", url, resp.status());
            return None;
        }

        match resp.json::<T>().await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to decode response from {}: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl BookDataProvider for OpenLibraryClient {
    async fn fetch_book_data(&self, title: &str) -> Option<ExternalBookData> {
        let doc = self.search_book(title).await?;

        let description = match doc.key.as_deref() {
            Some(key) => self.get_description(key).await,
            None => None,
        };
        let cover_url = doc.cover_i.map(|id| self.cover_url(id, COVER_SIZE));

        Some(ExternalBookData {
            description,
            cover_url,
        })
    }
}
