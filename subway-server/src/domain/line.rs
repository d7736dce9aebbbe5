//! Line aggregate.
//!
//! A line owns an ordered chain of sections forming a single simple path:
//! each section's downstream station is the next section's upstream
//! station, and no station appears twice. The chain is a plain vector
//! scanned linearly; lines are short enough that this is never a cost.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Section, StationId, TopologyError};

/// Identifier of a line in the repository.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u64);

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A broken chain invariant, found when checking persisted state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("line has no sections")]
    Empty,

    #[error("section {index} does not continue the previous section")]
    Disconnected { index: usize },

    #[error("station {0} appears more than once")]
    RepeatedStation(StationId),
}

/// A validated request to create a line, before an id is allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLine {
    pub name: String,
    pub color: String,
    pub seed: Section,
}

impl NewLine {
    /// Validate the seed section of a new line.
    ///
    /// The seed has no chain to be checked against, so only distinct
    /// endpoints and a positive distance are required.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        up: StationId,
        down: StationId,
        distance: i64,
    ) -> Result<Self, TopologyError> {
        Ok(Self {
            name: name.into(),
            color: color.into(),
            seed: Section::from_raw(up, down, distance)?,
        })
    }

    pub fn into_line(self, id: LineId) -> Line {
        Line {
            id,
            name: self.name,
            color: self.color,
            sections: vec![self.seed],
        }
    }
}

/// A subway line: name, color and its section chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineRecord")]
pub struct Line {
    id: LineId,
    name: String,
    color: String,
    sections: Vec<Section>,
}

#[derive(Deserialize)]
struct LineRecord {
    id: LineId,
    name: String,
    color: String,
    sections: Vec<Section>,
}

impl TryFrom<LineRecord> for Line {
    type Error = ChainError;

    fn try_from(r: LineRecord) -> Result<Self, Self::Error> {
        let line = Line {
            id: r.id,
            name: r.name,
            color: r.color,
            sections: r.sections,
        };
        line.check_chain()?;
        Ok(line)
    }
}

impl Line {
    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Replace name and color. The chain is untouched.
    pub fn rename(&mut self, name: impl Into<String>, color: impl Into<String>) {
        self.name = name.into();
        self.color = color.into();
    }

    /// Stations from the upstream terminus to the downstream terminus.
    pub fn stations(&self) -> Vec<StationId> {
        let mut stations = Vec::with_capacity(self.sections.len() + 1);
        if let Some(first) = self.sections.first() {
            stations.push(first.up());
        }
        stations.extend(self.sections.iter().map(Section::down));
        stations
    }

    /// Index of `station` in [`Line::stations`] order.
    pub fn position(&self, station: StationId) -> Option<usize> {
        let first = self.sections.first()?;
        if first.up() == station {
            return Some(0);
        }
        self.sections
            .iter()
            .position(|s| s.down() == station)
            .map(|i| i + 1)
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.sections.iter().any(|s| s.touches(station))
    }

    pub fn up_terminus(&self) -> Option<StationId> {
        self.sections.first().map(Section::up)
    }

    pub fn down_terminus(&self) -> Option<StationId> {
        self.sections.last().map(Section::down)
    }

    pub fn total_distance(&self) -> u64 {
        self.sections
            .iter()
            .map(|s| u64::from(s.distance().get()))
            .sum()
    }

    /// Copy of this line carrying a different chain.
    pub(crate) fn with_sections(&self, sections: Vec<Section>) -> Line {
        Line {
            id: self.id,
            name: self.name.clone(),
            color: self.color.clone(),
            sections,
        }
    }

    /// Verify the chain is a non-empty simple path.
    pub fn check_chain(&self) -> Result<(), ChainError> {
        if self.sections.is_empty() {
            return Err(ChainError::Empty);
        }
        for (index, pair) in self.sections.windows(2).enumerate() {
            if pair[0].down() != pair[1].up() {
                return Err(ChainError::Disconnected { index: index + 1 });
            }
        }
        let mut seen = HashSet::new();
        for station in self.stations() {
            if !seen.insert(station) {
                return Err(ChainError::RepeatedStation(station));
            }
        }
        Ok(())
    }
}
