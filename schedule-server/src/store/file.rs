//! File-backed record store for development and testing.
//!
//! Serves collections from `{dir}/{collection}.json`, each holding the same
//! `{"items": [...]}` shape the remote store returns. Uploads append to the
//! file. The methods here block; async callers go through `RecordStore`,
//! which runs them on the blocking pool.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use super::client::check_collection;
use super::error::StoreError;
use super::records::ListResponse;

/// Record store that reads JSON files from a directory.
///
/// Clones share the same upload lock.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: PathBuf,
    /// Serialises read-modify-write on uploads.
    write_lock: Arc<Mutex<()>>,
}

impl FileRecordStore {
    /// Create a store over `dir`, which must exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(StoreError::Io {
                path: dir.display().to_string(),
                message: "not a directory".to_string(),
            });
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn path_for(&self, collection: &str) -> Result<PathBuf, StoreError> {
        check_collection(collection)?;
        Ok(self.dir.join(format!("{collection}.json")))
    }

    fn read_listing<T: DeserializeOwned>(
        &self,
        collection: &str,
        path: &Path,
    ) -> Result<ListResponse<T>, StoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&json).map_err(|e| StoreError::Json {
            collection: collection.to_string(),
            message: e.to_string(),
        })
    }

    /// Read every record in `collection`. A missing file is an empty collection.
    pub fn fetch_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let path = self.path_for(collection)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        Ok(self.read_listing(collection, &path)?.items)
    }

    /// Append `data` to `collection`, creating the file if needed.
    pub fn upload(
        &self,
        collection: &str,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value, StoreError> {
        let path = self.path_for(collection)?;
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut listing: ListResponse<serde_json::Value> = if path.exists() {
            self.read_listing(collection, &path)?
        } else {
            ListResponse {
                page: 0,
                total_pages: 0,
                items: Vec::new(),
            }
        };
        listing.items.push(data.clone());

        let json = serde_json::to_string_pretty(&listing).map_err(|e| StoreError::Json {
            collection: collection.to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, json).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::records::{DelayRecord, TrainRecord};

    #[test]
    fn reads_collection_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("trains.json"),
            r#"{"items": [{"number": "T1", "priority": 1, "schedule": [{"station": "X", "time": "10:00"}]}]}"#,
        )
        .unwrap();

        let store = FileRecordStore::new(dir.path()).unwrap();
        let trains: Vec<TrainRecord> = store.fetch_collection("trains").unwrap();
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].number, "T1");
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(dir.path()).unwrap();
        let delays: Vec<DelayRecord> = store.fetch_collection("delays").unwrap();
        assert!(delays.is_empty());
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("delays.json"), "{not json").unwrap();
        let store = FileRecordStore::new(dir.path()).unwrap();
        let err = store.fetch_collection::<DelayRecord>("delays").unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[test]
    fn upload_appends() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(dir.path()).unwrap();

        let first = serde_json::json!({"train_number": "T1", "delay_minutes": 4});
        let second = serde_json::json!({"train_number": "T2", "delay_minutes": 9});
        assert_eq!(store.upload("delays", &first).unwrap(), first);
        store.upload("delays", &second).unwrap();

        let delays: Vec<DelayRecord> = store.fetch_collection("delays").unwrap();
        assert_eq!(delays.len(), 2);
        assert_eq!(delays[1].train_number, "T2");
    }

    #[test]
    fn rejects_bad_collection_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.fetch_collection::<DelayRecord>("../etc"),
            Err(StoreError::InvalidCollection(_))
        ));

        assert!(FileRecordStore::new(dir.path().join("missing")).is_err());
    }
}
