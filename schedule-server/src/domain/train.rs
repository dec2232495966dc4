//! Trains, their stops, and the per-train inputs to scheduling.

use std::collections::HashMap;

use super::error::ValidationError;
use super::station::{Station, TrainId};
use super::time::ClockTime;

/// A train's rank in conflicts. Lower values take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(pub i64);

/// One call on a train's itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStop {
    pub station: Station,
    pub time: ClockTime,
}

impl StationStop {
    pub fn new(station: Station, time: ClockTime) -> Self {
        Self { station, time }
    }
}

/// A train and its undelayed timetable.
///
/// The schedule is in itinerary order and always has at least one stop.
///
/// ```
/// use schedule_server::domain::Train;
///
/// let train = Train::parse("T1", 1, [("X", "10:00"), ("Y", "10:30")]).unwrap();
/// assert_eq!(train.schedule().len(), 2);
///
/// assert!(Train::parse("T1", 1, [("X", "10.00")]).is_err());
/// assert!(Train::parse("T1", 1, Vec::<(&str, &str)>::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    id: TrainId,
    priority: Priority,
    schedule: Vec<StationStop>,
}

impl Train {
    /// Build a train from already-validated parts.
    pub fn new(
        id: TrainId,
        priority: Priority,
        schedule: Vec<StationStop>,
    ) -> Result<Self, ValidationError> {
        if schedule.is_empty() {
            return Err(ValidationError::EmptySchedule(id.to_string()));
        }
        Ok(Self {
            id,
            priority,
            schedule,
        })
    }

    /// Parse a train from raw `(station, "HH:MM")` pairs.
    pub fn parse<I, S, T>(id: &str, priority: i64, stops: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let train_id = TrainId::parse(id)?;

        let schedule = stops
            .into_iter()
            .enumerate()
            .map(|(index, (station, time))| {
                let station = Station::parse(station.as_ref()).map_err(|source| {
                    ValidationError::InvalidStation {
                        train: id.to_string(),
                        index,
                        source,
                    }
                })?;
                let time = ClockTime::parse_hhmm(time.as_ref()).map_err(|source| {
                    ValidationError::InvalidTime {
                        train: id.to_string(),
                        source,
                    }
                })?;
                Ok(StationStop::new(station, time))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Self::new(train_id, Priority(priority), schedule)
    }

    pub fn id(&self) -> &TrainId {
        &self.id
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The undelayed timetable, in itinerary order.
    pub fn schedule(&self) -> &[StationStop] {
        &self.schedule
    }

    /// Undelayed time at the first call at `station`, if the train calls there.
    pub fn scheduled_time_at(&self, station: &Station) -> Option<ClockTime> {
        self.schedule
            .iter()
            .find(|stop| &stop.station == station)
            .map(|stop| stop.time)
    }
}

/// Per-train delay in minutes. Trains without an entry are on time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelayMap {
    delays: HashMap<TrainId, i64>,
}

impl DelayMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay for a train, replacing any previous value.
    pub fn insert(&mut self, train: TrainId, minutes: i64) {
        self.delays.insert(train, minutes);
    }

    /// Delay for `train`, or 0 if none was recorded.
    pub fn get(&self, train: &TrainId) -> i64 {
        self.delays.get(train).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}

impl FromIterator<(TrainId, i64)> for DelayMap {
    fn from_iter<I: IntoIterator<Item = (TrainId, i64)>>(iter: I) -> Self {
        Self {
            delays: iter.into_iter().collect(),
        }
    }
}

/// Minimum separation between two arrivals at the same station, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Headway(u32);

impl Headway {
    /// Used by the service when a caller leaves headway unset or zero.
    pub const DEFAULT: Headway = Headway(10);

    /// Validate a headway. Negative values are rejected.
    pub fn new(minutes: i64) -> Result<Self, ValidationError> {
        u32::try_from(minutes)
            .map(Headway)
            .map_err(|_| ValidationError::InvalidHeadway(minutes))
    }

    pub fn minutes(&self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for Headway {
    fn default() -> Self {
        Self::DEFAULT
    }
}
