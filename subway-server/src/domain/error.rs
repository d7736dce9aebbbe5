//! Topology error types.
//!
//! Every way a line mutation can be rejected. These are request-rejection
//! errors: each reflects a problem with the client's input, none is
//! transient, and none is ever produced after the chain has been touched.

use super::{Distance, StationId};

/// Rejection of a line creation, insertion or removal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// Malformed section: equal endpoints or a non-positive distance
    #[error("invalid section: {0}")]
    InvalidSection(String),

    /// Neither endpoint of the proposed section is on the line
    #[error("section {up} -> {down} does not touch the line")]
    DisconnectedSection { up: StationId, down: StationId },

    /// The proposed section already exists as an adjacent edge
    #[error("section {up} -> {down} already exists on the line")]
    DuplicateSection { up: StationId, down: StationId },

    /// The proposed section would create a branch or a cycle
    #[error("section {up} -> {down} would create a branch or cycle")]
    InvalidTopology { up: StationId, down: StationId },

    /// A split-insertion is not shorter than the section it splits
    #[error("distance {requested} must be shorter than the existing section ({existing})")]
    DistanceTooLong {
        requested: Distance,
        existing: Distance,
    },

    /// The removal target is not on the line
    #[error("station {0} is not on the line")]
    StationNotInLine(StationId),

    /// The line has a single section, which cannot be removed
    #[error("a line must keep at least one section")]
    MinimumSectionViolation,

    /// Merging two sections would overflow the distance range
    #[error("merged distance {first} + {second} is out of range")]
    DistanceOverflow { first: Distance, second: Distance },
}
