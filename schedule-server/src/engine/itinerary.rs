//! Per-train itineraries and the schedule builder.

use crate::domain::{ClockTime, DelayMap, Station, StationStop, Train, TrainId};

/// A train's stops with the times the scheduler has assigned to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    train: TrainId,
    stops: Vec<StationStop>,
}

impl Itinerary {
    pub fn new(train: TrainId, stops: Vec<StationStop>) -> Self {
        Self { train, stops }
    }

    pub fn train(&self) -> &TrainId {
        &self.train
    }

    pub fn stops(&self) -> &[StationStop] {
        &self.stops
    }

    /// Index of the first call at `station`.
    pub fn position_of(&self, station: &Station) -> Option<usize> {
        self.stops.iter().position(|stop| &stop.station == station)
    }

    /// Time at the first call at `station`.
    pub fn time_at(&self, station: &Station) -> Option<ClockTime> {
        self.position_of(station).map(|idx| self.stops[idx].time)
    }

    /// Time at the origin.
    pub fn departure(&self) -> Option<ClockTime> {
        self.stops.first().map(|stop| stop.time)
    }

    /// Time at the destination.
    pub fn arrival(&self) -> Option<ClockTime> {
        self.stops.last().map(|stop| stop.time)
    }

    /// Move the stop at `idx` and every later stop by `minutes`.
    pub(super) fn shift_from(&mut self, idx: usize, minutes: i64) {
        for stop in self.stops.iter_mut().skip(idx) {
            stop.time = stop.time.plus_minutes(minutes);
        }
    }

    /// Stops as `(station, "HH:MM")` pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.stops
            .iter()
            .map(|stop| (stop.station.to_string(), stop.time.to_string()))
            .collect()
    }
}

/// Apply each train's uniform delay to every one of its stops.
///
/// The result is index-aligned with `trains`.
pub fn build_base_schedules(trains: &[Train], delays: &DelayMap) -> Vec<Itinerary> {
    trains
        .iter()
        .map(|train| {
            let delay = delays.get(train.id());
            let stops = train
                .schedule()
                .iter()
                .map(|stop| StationStop::new(stop.station.clone(), stop.time.plus_minutes(delay)))
                .collect();
            Itinerary::new(train.id().clone(), stops)
        })
        .collect()
}
