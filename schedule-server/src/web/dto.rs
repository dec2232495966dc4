//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DelayMap, Headway, Train, TrainId, ValidationError};
use crate::store::StopRecord;

/// Request to compute a schedule.
///
/// `trains` and `delays` are each taken from the body when present and
/// fetched from the record store otherwise.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleRequest {
    /// Minimum separation in minutes; unset or zero uses the server default
    #[serde(default)]
    pub headway: Option<i64>,

    /// Inline trains keyed by train id
    #[serde(default)]
    pub trains: Option<BTreeMap<String, TrainSpec>>,

    /// Inline delays in minutes keyed by train id
    #[serde(default)]
    pub delays: Option<BTreeMap<String, i64>>,
}

/// A train supplied inline in a schedule request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainSpec {
    /// Lower values win conflicts
    pub priority: i64,

    /// Stops in itinerary order
    pub schedule: Vec<StopRecord>,
}

impl ScheduleRequest {
    /// The headway to schedule with.
    pub fn headway_or(&self, default: Headway) -> Result<Headway, ValidationError> {
        match self.headway {
            None | Some(0) => Ok(default),
            Some(minutes) => Headway::new(minutes),
        }
    }
}

/// Validate inline trains. They are scheduled in train id order.
pub fn trains_from_specs(specs: &BTreeMap<String, TrainSpec>) -> Result<Vec<Train>, ValidationError> {
    specs
        .iter()
        .map(|(id, spec)| {
            Train::parse(
                id,
                spec.priority,
                spec.schedule
                    .iter()
                    .map(|s| (s.station.as_str(), s.time.as_str())),
            )
        })
        .collect()
}

/// Validate inline delays.
pub fn delays_from_map(delays: &BTreeMap<String, i64>) -> Result<DelayMap, ValidationError> {
    delays
        .iter()
        .map(|(id, minutes)| {
            let id = TrainId::parse(id).map_err(ValidationError::from)?;
            Ok((id, *minutes))
        })
        .collect()
}

/// Request to create a record in the store.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Target collection name
    pub collection: String,

    /// Record body, passed through unchanged
    pub data: serde_json::Value,
}

/// Service status message.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
