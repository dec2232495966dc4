//! Headway-based rescheduling engine.
//!
//! This module answers: "given these trains, their delays and a minimum
//! separation at stations, when does each train actually arrive?"
//!
//! It applies each train's delay uniformly, then visits every station once
//! and greedily resolves headway conflicts there by priority, pushing the
//! losing train's remaining itinerary later. The engine is synchronous and
//! does no I/O; one call owns all the state it mutates.

mod itinerary;
mod priority;
mod propagate;
mod resolver;
mod result;
mod scheduler;
mod throughput;

#[cfg(test)]
mod scenario_tests;

pub use itinerary::{Itinerary, build_base_schedules};
pub use priority::{PriorityPolicy, StaticPriority};
pub use propagate::propagate_delay;
pub use resolver::{Arrival, resolve_conflicts};
pub use result::{ScheduleResult, ScheduleTable};
pub use scheduler::{ScheduleOutcome, Scheduler};
pub use throughput::{Throughput, compute_throughput};

use crate::domain::ScheduleProblem;

/// Run the default scheduler and serialize its output.
pub fn schedule(problem: &ScheduleProblem) -> ScheduleResult {
    ScheduleResult::from(&Scheduler::new().run(problem))
}
