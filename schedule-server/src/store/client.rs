//! HTTP client for the record store.
//!
//! The store exposes collections at `{base}/api/collections/{name}/records`.
//! Listing is paginated; `fetch_collection` walks every page.

use serde::de::DeserializeOwned;

use super::error::StoreError;
use super::records::ListResponse;

/// Default base URL for a locally running record store.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8090";

/// Records requested per page.
const DEFAULT_PAGE_SIZE: u32 = 500;

/// Configuration for the record store client.
#[derive(Debug, Clone)]
pub struct RecordStoreConfig {
    /// Base URL of the store, without the `/api/collections` suffix
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Records requested per page
    pub page_size: u32,
}

impl RecordStoreConfig {
    /// Create a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the page size used when listing collections.
    pub fn with_page_size(mut self, n: u32) -> Self {
        self.page_size = n;
        self
    }
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Collection names are restricted to ASCII letters, digits and underscores.
pub(crate) fn check_collection(name: &str) -> Result<(), StoreError> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(StoreError::InvalidCollection(name.to_string()));
    }
    Ok(())
}

/// Record store API client.
#[derive(Debug, Clone)]
pub struct RecordStoreClient {
    http: reqwest::Client,
    collections_url: String,
    page_size: u32,
}

impl RecordStoreClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RecordStoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            collections_url: format!("{}/api/collections", config.base_url.trim_end_matches('/')),
            page_size: config.page_size,
        })
    }

    fn records_url(&self, collection: &str) -> String {
        format!("{}/{}/records", self.collections_url, collection)
    }

    /// Fetch every record in `collection`.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        check_collection(collection)?;
        let url = self.records_url(collection);

        let mut items = Vec::new();
        let mut page = 1u32;
        loop {
            let response = self
                .http
                .get(&url)
                .query(&[("page", page), ("perPage", self.page_size)])
                .send()
                .await?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(StoreError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let body = response.text().await?;
            let listing: ListResponse<T> =
                serde_json::from_str(&body).map_err(|e| StoreError::Json {
                    collection: collection.to_string(),
                    message: e.to_string(),
                })?;

            items.extend(listing.items);
            if page >= listing.total_pages {
                break;
            }
            page += 1;
        }

        tracing::debug!(collection, records = items.len(), "fetched collection");
        Ok(items)
    }

    /// Create a record in `collection`, returning the store's response body.
    pub async fn upload(
        &self,
        collection: &str,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value, StoreError> {
        check_collection(collection)?;
        let url = self.records_url(collection);

        let response = self.http.post(&url).json(data).send().await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK && status != reqwest::StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Json {
            collection: collection.to_string(),
            message: e.to_string(),
        })
    }
}
