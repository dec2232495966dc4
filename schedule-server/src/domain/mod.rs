//! Domain types for the headway scheduler.
//!
//! This module contains the validated inputs to scheduling. All types
//! enforce their invariants at construction time, so the scheduling
//! engine can trust what it receives.

mod error;
mod problem;
mod station;
mod time;
mod train;

pub use error::ValidationError;
pub use problem::ScheduleProblem;
pub use station::{EmptyName, Station, TrainId};
pub use time::{ClockTime, ParseError, minutes_between};
pub use train::{DelayMap, Headway, Priority, StationStop, Train};
