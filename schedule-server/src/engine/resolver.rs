//! Headway conflict resolution at a single station.
//!
//! Arrivals are kept sorted by time and scanned pairwise. When two
//! neighbours are closer than the headway, the lower-ranked train is
//! moved to exactly one headway after the winner. Moving a train can
//! create a new clash with a different neighbour, so after every move the
//! list is re-sorted and the scan starts again from the front. The scan
//! finishes once a full pass finds nothing to fix.
//!
//! Every restart moves one arrival strictly later, to one headway after a
//! train that outranks it. The top-ranked train never moves, so the loop
//! settles; in practice within `(n - 1)²` restarts for `n` arrivals. The
//! loop is still capped at `n²` restarts, and hitting the cap is logged.

use std::cmp::Ordering;

use tracing::{trace, warn};

use crate::domain::{ClockTime, Headway, Priority, TrainId, minutes_between};

/// One train's arrival at the station being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub train: TrainId,
    /// Current arrival time; updated by resolution.
    pub time: ClockTime,
    pub priority: Priority,
    /// Minutes behind the undelayed timetable at this station.
    pub delay_here: i64,
    /// Undelayed timetabled time at this station.
    pub scheduled: ClockTime,
}

/// Whether `earlier` (the first of two sorted neighbours) keeps its slot.
///
/// Lower priority value wins. On equal priority the train timetabled
/// earlier at this station wins, and a full tie goes to `earlier`.
fn keeps_slot(earlier: &Arrival, later: &Arrival) -> bool {
    match earlier.priority.cmp(&later.priority) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => earlier.scheduled <= later.scheduled,
    }
}

/// Resolve every headway violation among `arrivals`.
///
/// Returns the arrivals sorted by resolved time. A station with fewer
/// than two arrivals is returned untouched.
pub fn resolve_conflicts(mut arrivals: Vec<Arrival>, headway: Headway) -> Vec<Arrival> {
    if arrivals.len() < 2 {
        return arrivals;
    }

    let gap = headway.minutes();
    arrivals.sort_by_key(|a| a.time);

    let max_restarts = arrivals.len().saturating_mul(arrivals.len());
    let mut restarts = 0usize;
    let mut i = 1;
    while i < arrivals.len() {
        let prev = &arrivals[i - 1];
        let curr = &arrivals[i];

        if minutes_between(prev.time, curr.time) < gap {
            let (winner, loser) = if keeps_slot(prev, curr) {
                (i - 1, i)
            } else {
                (i, i - 1)
            };

            let pushed = arrivals[winner].time.plus_minutes(gap);
            if pushed > arrivals[loser].time {
                if restarts >= max_restarts {
                    warn!(
                        arrivals = arrivals.len(),
                        restarts, "headway resolution hit its restart limit"
                    );
                    break;
                }
                trace!(
                    winner = %arrivals[winner].train,
                    loser = %arrivals[loser].train,
                    from = %arrivals[loser].time,
                    to = %pushed,
                    "headway conflict"
                );
                arrivals[loser].time = pushed;
                arrivals.sort_by_key(|a| a.time);
                restarts += 1;
                i = 1;
                continue;
            }
        }

        i += 1;
    }

    trace!(arrivals = arrivals.len(), restarts, "station resolved");
    arrivals
}
