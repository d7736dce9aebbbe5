//! Domain types for the subway network.
//!
//! This module contains the validated model the topology engine works on.
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod distance;
mod error;
mod line;
mod section;
mod station;

pub use distance::{Distance, InvalidDistance};
pub use error::TopologyError;
pub use line::{ChainError, Line, LineId, NewLine};
pub use section::Section;
pub use station::{Station, StationId};
