//! Effective priority used to rank trains in a conflict.

use crate::domain::{Priority, Train};

/// Decides how a train ranks at a station where it is in conflict.
///
/// `delay_here` is how many minutes the train is running behind its
/// undelayed timetable at that station.
pub trait PriorityPolicy {
    fn effective_priority(&self, train: &Train, delay_here: i64) -> Priority;
}

/// Ranks every train by its timetabled priority, ignoring delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPriority;

impl PriorityPolicy for StaticPriority {
    fn effective_priority(&self, train: &Train, _delay_here: i64) -> Priority {
        train.priority()
    }
}
