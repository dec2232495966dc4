//! Wire types for the record store's list API.
//!
//! These mirror the store's JSON exactly. Extra fields the store adds to
//! every record (ids, timestamps) are ignored.

use serde::{Deserialize, Serialize};

/// One page of a collection listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default)]
    pub page: u32,
    /// Zero when the source does not paginate.
    #[serde(default)]
    pub total_pages: u32,
    pub items: Vec<T>,
}

/// A stop inside a train record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StopRecord {
    pub station: String,
    pub time: String,
}

/// A record from the `trains` collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrainRecord {
    pub number: String,
    pub priority: i64,
    pub schedule: Vec<StopRecord>,
}

/// A record from the `delays` collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DelayRecord {
    pub train_number: String,
    pub delay_minutes: i64,
}
