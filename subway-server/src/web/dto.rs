//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::service::{LineView, StationView};

/// Request to create or rename a station.
#[derive(Debug, Deserialize)]
pub struct StationRequest {
    pub name: String,
}

/// A station in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationResponse {
    pub id: u64,
    pub name: String,
}

/// Request to create a line with its first section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: u64,
    pub down_station_id: u64,

    /// Signed so that negative values reach validation
    pub distance: i64,
}

/// Request to rename or recolor a line.
#[derive(Debug, Deserialize)]
pub struct UpdateLineRequest {
    pub name: String,
    pub color: String,
}

/// Request to add a section to a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: i64,
}

/// Query for removing a station from a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSectionQuery {
    pub station_id: u64,
}

/// A line in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResponse {
    pub id: u64,
    pub name: String,
    pub color: String,

    /// Stations from upstream to downstream terminus
    pub stations: Vec<StationResponse>,

    /// Total length of the line
    pub distance: u64,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Stable machine-readable error kind
    pub code: String,
}

// Conversion implementations

impl From<StationView> for StationResponse {
    fn from(view: StationView) -> Self {
        Self {
            id: view.id.0,
            name: view.name,
        }
    }
}

impl From<LineView> for LineResponse {
    fn from(view: LineView) -> Self {
        Self {
            id: view.id.0,
            name: view.name,
            color: view.color,
            stations: view.stations.into_iter().map(StationResponse::from).collect(),
            distance: view.distance,
        }
    }
}
