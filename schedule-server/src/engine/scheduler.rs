//! Station-by-station rescheduling.
//!
//! The scheduler visits every station exactly once, in name order. At
//! each one it collects the trains' current arrival times, resolves
//! headway conflicts among them, and pushes any resulting delay forward
//! along each affected train's itinerary.
//!
//! Stations are not visited in travel order, and there is no second pass.
//! A delay pushed forward from a station late in name order can land on a
//! station that was already resolved and reopen a conflict there; that
//! conflict is left in the output.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use crate::domain::{ScheduleProblem, Station, TrainId, minutes_between};

use super::itinerary::{Itinerary, build_base_schedules};
use super::priority::{PriorityPolicy, StaticPriority};
use super::propagate::propagate_delay;
use super::resolver::{Arrival, resolve_conflicts};
use super::throughput::{Throughput, compute_throughput};

/// Output of one scheduling run.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Delay-only itineraries, index-aligned with the input trains.
    pub base: Vec<Itinerary>,
    /// Itineraries after conflict resolution, index-aligned with `base`.
    pub final_schedules: Vec<Itinerary>,
    pub throughput: Throughput,
}

/// Runs the rescheduling pass with a given priority policy.
#[derive(Debug, Clone, Default)]
pub struct Scheduler<P = StaticPriority> {
    policy: P,
}

impl Scheduler<StaticPriority> {
    /// A scheduler ranking trains by timetabled priority.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: PriorityPolicy> Scheduler<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    /// Compute base and final schedules for `problem`.
    pub fn run(&self, problem: &ScheduleProblem) -> ScheduleOutcome {
        let base = build_base_schedules(&problem.trains, &problem.delays);
        let mut final_schedules = base.clone();

        let by_id: HashMap<&TrainId, usize> = problem
            .trains
            .iter()
            .enumerate()
            .map(|(i, train)| (train.id(), i))
            .collect();

        let stations: BTreeSet<&Station> = problem
            .trains
            .iter()
            .flat_map(|train| train.schedule().iter().map(|stop| &stop.station))
            .collect();

        let mut total_shifted = 0usize;
        for station in stations {
            let arrivals = self.arrivals_at(problem, &final_schedules, station);
            if arrivals.len() < 2 {
                continue;
            }

            let resolved = resolve_conflicts(arrivals, problem.headway);

            let mut shifted = 0usize;
            for arrival in &resolved {
                let Some(&idx) = by_id.get(&arrival.train) else {
                    continue;
                };
                if propagate_delay(&mut final_schedules[idx], &base[idx], station, arrival.time)
                    .is_some()
                {
                    shifted += 1;
                }
            }

            if shifted > 0 {
                debug!(station = %station, trains = resolved.len(), shifted, "resolved conflicts");
            }
            total_shifted += shifted;
        }

        let throughput = compute_throughput(&final_schedules);
        info!(
            trains = throughput.num_trains,
            shifts = total_shifted,
            headway = problem.headway.minutes(),
            throughput = throughput.trains_per_hour,
            "schedule computed"
        );

        ScheduleOutcome {
            base,
            final_schedules,
            throughput,
        }
    }

    /// Current arrivals at `station`, one per calling train, in train order.
    fn arrivals_at(
        &self,
        problem: &ScheduleProblem,
        current: &[Itinerary],
        station: &Station,
    ) -> Vec<Arrival> {
        problem
            .trains
            .iter()
            .zip(current)
            .filter_map(|(train, itinerary)| {
                let time = itinerary.time_at(station)?;
                let scheduled = train.scheduled_time_at(station)?;
                let delay_here = minutes_between(scheduled, time);
                Some(Arrival {
                    train: train.id().clone(),
                    time,
                    priority: self.policy.effective_priority(train, delay_here),
                    delay_here,
                    scheduled,
                })
            })
            .collect()
    }
}
