//! Domain error types.
//!
//! These errors represent structurally invalid scheduling input. They are
//! raised while building domain records, before any scheduling runs, and
//! are distinct from record store / IO errors.

use super::station::EmptyName;
use super::time::ParseError;

/// Validation failures for trains, delays and headway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A train id was empty
    #[error(transparent)]
    EmptyId(#[from] EmptyName),

    /// A stop on a train had an empty station name
    #[error("train {train}: stop {index}: {source}")]
    InvalidStation {
        train: String,
        index: usize,
        #[source]
        source: EmptyName,
    },

    /// A stop on a train had a malformed time
    #[error("train {train}: {source}")]
    InvalidTime {
        train: String,
        #[source]
        source: ParseError,
    },

    /// A train has no stops
    #[error("train {0} has an empty schedule")]
    EmptySchedule(String),

    /// The same train id appeared twice
    #[error("duplicate train id: {0}")]
    DuplicateTrain(String),

    /// Headway was negative or too large
    #[error("headway must be a non-negative number of minutes, got {0}")]
    InvalidHeadway(i64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Station};

    #[test]
    fn error_display() {
        let err = ValidationError::EmptySchedule("T1".into());
        assert_eq!(err.to_string(), "train T1 has an empty schedule");

        let err = ValidationError::DuplicateTrain("T1".into());
        assert_eq!(err.to_string(), "duplicate train id: T1");

        let err = ValidationError::InvalidHeadway(-5);
        assert_eq!(
            err.to_string(),
            "headway must be a non-negative number of minutes, got -5"
        );

        let source = ClockTime::parse_hhmm("9:30").unwrap_err();
        let err = ValidationError::InvalidTime {
            train: "T2".into(),
            source,
        };
        assert_eq!(
            err.to_string(),
            "train T2: invalid time \"9:30\": expected HH:MM format"
        );

        let source = Station::parse("").unwrap_err();
        let err = ValidationError::InvalidStation {
            train: "T3".into(),
            index: 1,
            source,
        };
        assert_eq!(
            err.to_string(),
            "train T3: stop 1: invalid station name: must not be empty"
        );
    }
}
