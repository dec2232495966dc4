//! Conversion from store records to domain types.

use crate::domain::{DelayMap, Train, TrainId, ValidationError};

use super::records::{DelayRecord, TrainRecord};

/// Validate and convert train records, keeping their order.
pub fn trains_from_records(records: &[TrainRecord]) -> Result<Vec<Train>, ValidationError> {
    records
        .iter()
        .map(|r| {
            Train::parse(
                &r.number,
                r.priority,
                r.schedule.iter().map(|s| (s.station.as_str(), s.time.as_str())),
            )
        })
        .collect()
}

/// Convert delay records. A later record for the same train replaces an
/// earlier one.
pub fn delays_from_records(records: &[DelayRecord]) -> Result<DelayMap, ValidationError> {
    let mut delays = DelayMap::new();
    for r in records {
        delays.insert(TrainId::parse(&r.train_number)?, r.delay_minutes);
    }
    Ok(delays)
}
