//! Section: a distance-bearing edge between two stations.

use serde::{Deserialize, Serialize};

use super::{Distance, StationId, TopologyError};

/// A directed edge from an upstream to a downstream station.
///
/// The endpoints are always distinct and the distance always positive.
/// Sections are never edited in place; the topology engine replaces them
/// whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SectionRecord")]
pub struct Section {
    up: StationId,
    down: StationId,
    distance: Distance,
}

/// Unvalidated wire form of a section.
#[derive(Deserialize)]
struct SectionRecord {
    up: StationId,
    down: StationId,
    distance: Distance,
}

impl TryFrom<SectionRecord> for Section {
    type Error = TopologyError;

    fn try_from(r: SectionRecord) -> Result<Self, Self::Error> {
        Section::new(r.up, r.down, r.distance)
    }
}

impl Section {
    /// Create a section, rejecting a loop back to the same station.
    pub fn new(up: StationId, down: StationId, distance: Distance) -> Result<Self, TopologyError> {
        if up == down {
            return Err(TopologyError::InvalidSection(format!(
                "up and down station must differ (both {up})"
            )));
        }
        Ok(Self { up, down, distance })
    }

    /// Create a section from a raw wire distance.
    pub fn from_raw(up: StationId, down: StationId, distance: i64) -> Result<Self, TopologyError> {
        let distance =
            Distance::new(distance).map_err(|e| TopologyError::InvalidSection(e.to_string()))?;
        Self::new(up, down, distance)
    }

    pub fn up(&self) -> StationId {
        self.up
    }

    pub fn down(&self) -> StationId {
        self.down
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Whether either endpoint is `station`.
    pub fn touches(&self, station: StationId) -> bool {
        self.up == station || self.down == station
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Distance {
        Distance::new(v).unwrap()
    }

    #[test]
    fn new_section() {
        let s = Section::new(StationId(1), StationId(2), d(5)).unwrap();
        assert_eq!(s.up(), StationId(1));
        assert_eq!(s.down(), StationId(2));
        assert_eq!(s.distance(), d(5));
    }

    #[test]
    fn rejects_same_endpoints() {
        let err = Section::new(StationId(1), StationId(1), d(5)).unwrap_err();
        assert!(matches!(err, TopologyError::InvalidSection(_)));
    }

    #[test]
    fn from_raw_rejects_bad_distance() {
        assert!(matches!(
            Section::from_raw(StationId(1), StationId(2), 0),
            Err(TopologyError::InvalidSection(_))
        ));
        assert!(matches!(
            Section::from_raw(StationId(1), StationId(2), -4),
            Err(TopologyError::InvalidSection(_))
        ));
        assert!(Section::from_raw(StationId(1), StationId(2), 4).is_ok());
    }

    #[test]
    fn touches() {
        let s = Section::new(StationId(1), StationId(2), d(5)).unwrap();
        assert!(s.touches(StationId(1)));
        assert!(s.touches(StationId(2)));
        assert!(!s.touches(StationId(3)));
    }

    #[test]
    fn deserialize_validates_endpoints() {
        let ok: Section = serde_json::from_str(r#"{"up":1,"down":2,"distance":3}"#).unwrap();
        assert_eq!(ok.distance(), d(3));
        assert!(serde_json::from_str::<Section>(r#"{"up":1,"down":1,"distance":3}"#).is_err());
        assert!(serde_json::from_str::<Section>(r#"{"up":1,"down":2,"distance":0}"#).is_err());
    }
}
