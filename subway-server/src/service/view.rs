//! Read projections of lines and stations.

use crate::domain::{LineId, Station, StationId};

/// A station as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationView {
    pub id: StationId,
    pub name: String,
}

impl From<Station> for StationView {
    fn from(station: Station) -> Self {
        Self {
            id: station.id,
            name: station.name,
        }
    }
}

/// A line with its stations listed from upstream to downstream terminus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub id: LineId,
    pub name: String,
    pub color: String,
    pub stations: Vec<StationView>,
    /// Sum of all section distances.
    pub distance: u64,
}
