//! Clock times for timetable data.
//!
//! Timetables carry times as "HH:MM" strings with no date. All arithmetic
//! happens on a single nominal day: a time is a signed minute offset from
//! that day's midnight, so applying a large delay can carry a time past
//! 24:00 without losing ordering. Formatting wraps back onto the 24-hour
//! clock.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Minutes in one day, used when formatting times that ran past midnight.
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct ParseError {
    input: String,
    reason: &'static str,
}

impl ParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A time on the nominal scheduling day.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("14:30").unwrap();
/// assert_eq!(t.to_string(), "14:30");
///
/// // Delays may carry a time past midnight; it still sorts after the original.
/// let late = t.plus_minutes(600);
/// assert!(late > t);
/// assert_eq!(late.to_string(), "00:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    minutes: i64,
}

impl ClockTime {
    /// Create a time from a minute offset relative to nominal midnight.
    pub fn from_minutes(minutes: i64) -> Self {
        Self { minutes }
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// ```
    /// use schedule_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("1430").is_err());
    /// assert!(ClockTime::parse_hhmm("9:30").is_err());
    /// assert!(ClockTime::parse_hhmm("25:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, ParseError> {
        if s.len() != 5 {
            return Err(ParseError::new(s, "expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(ParseError::new(s, "expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| ParseError::new(s, "invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| ParseError::new(s, "invalid minute digits"))?;

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| ParseError::new(s, "hour must be 0-23 and minute 0-59"))?;

        Ok(Self {
            minutes: i64::from(time.hour()) * 60 + i64::from(time.minute()),
        })
    }

    /// Minute offset relative to nominal midnight.
    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    /// This time moved by `delta` minutes (negative moves earlier).
    pub fn plus_minutes(self, delta: i64) -> Self {
        Self {
            minutes: self.minutes.saturating_add(delta),
        }
    }

    /// Whole minutes from `earlier` to `self`; negative if `earlier` is later.
    pub fn minutes_since(&self, earlier: ClockTime) -> i64 {
        self.minutes.saturating_sub(earlier.minutes)
    }

    /// The wall-clock time this instant displays as.
    pub fn time_of_day(&self) -> NaiveTime {
        let secs = self.minutes.rem_euclid(MINUTES_PER_DAY) as u32 * 60;
        NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or_default()
    }
}

/// Whole minutes elapsed from `start` to `end`.
pub fn minutes_between(start: ClockTime, end: ClockTime) -> i64 {
    end.minutes_since(start)
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self} {:+}m)", self.minutes)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.time_of_day();
        write!(f, "{:02}:{:02}", t.hour(), t.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
