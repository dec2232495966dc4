//! Station and train identifiers.

use std::fmt;

/// Error returned when a name or id is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: must not be empty")]
pub struct EmptyName {
    kind: &'static str,
}

/// A station name as it appears in timetable records.
///
/// Names are compared exactly; "Kings Cross" and "kings cross" are
/// different stations. Ordering is by name, which is the order the
/// scheduler visits stations in.
///
/// ```
/// use schedule_server::domain::Station;
///
/// let x = Station::parse("X").unwrap();
/// assert_eq!(x.as_str(), "X");
/// assert!(Station::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Station(String);

impl Station {
    /// Parse a station name. Surrounding whitespace is significant.
    pub fn parse(s: &str) -> Result<Self, EmptyName> {
        if s.is_empty() {
            return Err(EmptyName { kind: "station name" });
        }
        Ok(Station(s.to_string()))
    }

    /// Returns the station name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.0)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A train's identity (its running number in the record store).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainId(String);

impl TrainId {
    /// Parse a train id.
    pub fn parse(s: &str) -> Result<Self, EmptyName> {
        if s.is_empty() {
            return Err(EmptyName { kind: "train id" });
        }
        Ok(TrainId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_empty() {
        assert_eq!(
            Station::parse("").unwrap_err().to_string(),
            "invalid station name: must not be empty"
        );
        assert_eq!(
            TrainId::parse("").unwrap_err().to_string(),
            "invalid train id: must not be empty"
        );
    }

    #[test]
    fn display_and_debug() {
        let s = Station::parse("Central").unwrap();
        assert_eq!(format!("{}", s), "Central");
        assert_eq!(format!("{:?}", s), "Station(Central)");

        let id = TrainId::parse("12951").unwrap();
        assert_eq!(format!("{}", id), "12951");
        assert_eq!(format!("{:?}", id), "TrainId(12951)");
    }

    #[test]
    fn stations_order_by_name() {
        let mut names: Vec<Station> = ["Y", "A", "X"]
            .iter()
            .map(|s| Station::parse(s).unwrap())
            .collect();
        names.sort();
        let sorted: Vec<&str> = names.iter().map(Station::as_str).collect();
        assert_eq!(sorted, ["A", "X", "Y"]);
    }
}
