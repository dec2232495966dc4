//! Writing a resolved station time back into a train's itinerary.

use crate::domain::{ClockTime, Station};

use super::itinerary::Itinerary;

/// Move `current` so that it reaches `station` at `resolved`, carrying the
/// same shift through every later stop.
///
/// The new time never drops below the train's base (delay-only) time at
/// that station, and a train is never moved earlier than it currently is.
/// Returns the shift applied in minutes, or `None` if the train does not
/// call at `station` or needed no change.
pub fn propagate_delay(
    current: &mut Itinerary,
    base: &Itinerary,
    station: &Station,
    resolved: ClockTime,
) -> Option<i64> {
    let idx = current.position_of(station)?;
    let floor = base.stops().get(idx)?.time;
    let chosen = floor.max(resolved);

    let shift = chosen.minutes_since(current.stops()[idx].time);
    if shift <= 0 {
        return None;
    }

    current.shift_from(idx, shift);
    Some(shift)
}
