//! Station identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a station in the directory.
///
/// Identifiers are allocated by the station directory and never reused
/// while the directory is alive. Sections refer to stations only through
/// this identifier; the station itself is owned by the directory.
///
/// # Examples
///
/// ```
/// use subway_server::domain::StationId;
///
/// let id = StationId(7);
/// assert_eq!(id.to_string(), "7");
/// assert_eq!(format!("{:?}", id), "StationId(7)");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u64);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station: identity plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
