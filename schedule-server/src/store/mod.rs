//! Record store access.
//!
//! Trains and delays live in an external record store as two collections,
//! `trains` and `delays`. This module fetches them, converts the records
//! into validated domain types, and relays record uploads. A file-backed
//! store with the same shape stands in for the remote one in development
//! and tests.

mod client;
mod convert;
mod error;
mod file;
mod records;

pub use client::{DEFAULT_BASE_URL, RecordStoreClient, RecordStoreConfig};
pub use convert::{delays_from_records, trains_from_records};
pub use error::StoreError;
pub use file::FileRecordStore;
pub use records::{DelayRecord, ListResponse, StopRecord, TrainRecord};

use crate::domain::{DelayMap, Train};

/// Collection holding train records.
pub const TRAINS_COLLECTION: &str = "trains";

/// Collection holding delay records.
pub const DELAYS_COLLECTION: &str = "delays";

/// Where records come from.
#[derive(Debug)]
pub enum RecordStore {
    Remote(RecordStoreClient),
    File(FileRecordStore),
}

impl RecordStore {
    /// Fetch every record in `collection`.
    pub async fn fetch_collection<T: serde::de::DeserializeOwned + Send + 'static>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        match self {
            RecordStore::Remote(client) => client.fetch_collection(collection).await,
            RecordStore::File(store) => {
                let store = store.clone();
                let collection = collection.to_string();
                tokio::task::spawn_blocking(move || store.fetch_collection(&collection)).await?
            }
        }
    }

    /// Create a record in `collection`.
    pub async fn upload(
        &self,
        collection: &str,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value, StoreError> {
        match self {
            RecordStore::Remote(client) => client.upload(collection, data).await,
            RecordStore::File(store) => {
                let store = store.clone();
                let collection = collection.to_string();
                let data = data.clone();
                tokio::task::spawn_blocking(move || store.upload(&collection, &data)).await?
            }
        }
    }

    /// Fetch and validate all trains.
    pub async fn fetch_trains(&self) -> Result<Vec<Train>, StoreError> {
        let records: Vec<TrainRecord> = self.fetch_collection(TRAINS_COLLECTION).await?;
        Ok(trains_from_records(&records)?)
    }

    /// Fetch and validate all delays.
    pub async fn fetch_delays(&self) -> Result<DelayMap, StoreError> {
        let records: Vec<DelayRecord> = self.fetch_collection(DELAYS_COLLECTION).await?;
        Ok(delays_from_records(&records)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_runs_off_the_async_thread() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::File(FileRecordStore::new(dir.path()).unwrap());

        let record = serde_json::json!({"train_number": "T4", "delay_minutes": 7});
        assert_eq!(store.upload(DELAYS_COLLECTION, &record).await.unwrap(), record);

        let delays = store.fetch_delays().await.unwrap();
        assert_eq!(delays.get(&crate::domain::TrainId::parse("T4").unwrap()), 7);

        assert!(matches!(
            store.upload("no/slash", &record).await,
            Err(StoreError::InvalidCollection(_))
        ));
    }

    #[tokio::test]
    async fn file_store_clones_share_upload_lock() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(RecordStore::File(FileRecordStore::new(dir.path()).unwrap()));

        let uploads = (0..8).map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let record = serde_json::json!({"train_number": format!("T{i}"), "delay_minutes": i});
                store.upload(DELAYS_COLLECTION, &record).await
            })
        });
        for upload in futures::future::join_all(uploads).await {
            upload.unwrap().unwrap();
        }

        assert_eq!(store.fetch_delays().await.unwrap().len(), 8);
    }
}
