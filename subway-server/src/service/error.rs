//! Service error types.

use crate::domain::{LineId, StationId, TopologyError};

/// Errors surfaced by the line and station services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The engine rejected the request
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// No line with this id
    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// No station with this id
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// The station is still part of a line's chain
    #[error("station {station} is used by line {line}")]
    StationInUse { station: StationId, line: LineId },
}
