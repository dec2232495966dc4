//! Serializable scheduling output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::itinerary::Itinerary;
use super::scheduler::ScheduleOutcome;

/// Train id to `[station, "HH:MM"]` pairs, in itinerary order.
pub type ScheduleTable = BTreeMap<String, Vec<(String, String)>>;

/// Externally observable result of a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub base_schedules: ScheduleTable,
    pub final_schedules: ScheduleTable,
    /// Trains per hour.
    pub throughput: f64,
    pub num_trains: usize,
    pub span_hours: f64,
}

fn table(schedules: &[Itinerary]) -> ScheduleTable {
    schedules
        .iter()
        .map(|itin| (itin.train().to_string(), itin.to_pairs()))
        .collect()
}

impl From<&ScheduleOutcome> for ScheduleResult {
    fn from(outcome: &ScheduleOutcome) -> Self {
        Self {
            base_schedules: table(&outcome.base),
            final_schedules: table(&outcome.final_schedules),
            throughput: outcome.throughput.trains_per_hour,
            num_trains: outcome.throughput.num_trains,
            span_hours: outcome.throughput.span_hours,
        }
    }
}
