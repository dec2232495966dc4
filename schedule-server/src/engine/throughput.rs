//! Network throughput over a set of schedules.

use crate::domain::minutes_between;

use super::itinerary::Itinerary;

/// Trains per hour across the span of a schedule set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throughput {
    pub trains_per_hour: f64,
    pub num_trains: usize,
    /// Hours from the earliest origin to the latest destination.
    pub span_hours: f64,
}

impl Throughput {
    /// The result for an empty schedule set.
    pub fn empty() -> Self {
        Self {
            trains_per_hour: 0.0,
            num_trains: 0,
            span_hours: 0.0,
        }
    }
}

/// Compute throughput from the earliest origin and latest destination.
///
/// The span is floored at one minute so a set whose trains all run at the
/// same instant still yields a finite rate.
pub fn compute_throughput(schedules: &[Itinerary]) -> Throughput {
    let earliest = schedules.iter().filter_map(Itinerary::departure).min();
    let latest = schedules.iter().filter_map(Itinerary::arrival).max();

    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return Throughput::empty();
    };

    let total_minutes = minutes_between(earliest, latest).max(1);
    let span_hours = total_minutes as f64 / 60.0;
    let num_trains = schedules.len();

    Throughput {
        trains_per_hour: num_trains as f64 / span_hours,
        num_trains,
        span_hours,
    }
}
