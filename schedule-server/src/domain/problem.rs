//! A complete, validated scheduling request.

use std::collections::HashSet;

use super::error::ValidationError;
use super::train::{DelayMap, Headway, Train};

/// Everything one scheduling run needs.
///
/// Trains keep the order they were supplied in. That order only matters
/// when two trains tie on arrival time, priority and original time at a
/// station; the earlier-listed train then keeps its slot.
#[derive(Debug, Clone)]
pub struct ScheduleProblem {
    pub trains: Vec<Train>,
    pub delays: DelayMap,
    pub headway: Headway,
}

impl ScheduleProblem {
    /// Assemble a problem, rejecting duplicate train ids.
    pub fn new(
        trains: Vec<Train>,
        delays: DelayMap,
        headway: Headway,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for train in &trains {
            if !seen.insert(train.id()) {
                return Err(ValidationError::DuplicateTrain(train.id().to_string()));
            }
        }

        Ok(Self {
            trains,
            delays,
            headway,
        })
    }
}
