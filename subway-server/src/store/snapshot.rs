//! JSON snapshot of the whole network on disk.
//!
//! The snapshot is rewritten after every successful mutation and read
//! back at startup. Writes go to a sibling temp file which is then renamed
//! over the target, so a crash mid-write leaves the previous snapshot.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::domain::{Line, Station};

use super::error::StoreError;

/// Everything needed to rebuild the stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unix timestamp when the snapshot was written.
    #[serde(default)]
    pub saved_at_secs: u64,

    /// Last station id handed out, so deleted ids stay retired.
    #[serde(default)]
    pub last_station_id: u64,

    /// Last line id handed out.
    #[serde(default)]
    pub last_line_id: u64,

    pub stations: Vec<Station>,
    pub lines: Vec<Line>,
}

impl Snapshot {
    pub fn new(stations: Vec<Station>, lines: Vec<Line>) -> Self {
        let saved_at_secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            saved_at_secs,
            last_station_id: stations.iter().map(|s| s.id.0).max().unwrap_or(0),
            last_line_id: lines.iter().map(|l| l.id().0).max().unwrap_or(0),
            stations,
            lines,
        }
    }

    /// Record the id counters of the stores the snapshot was taken from.
    pub fn with_last_ids(mut self, station: u64, line: u64) -> Self {
        self.last_station_id = self.last_station_id.max(station);
        self.last_line_id = self.last_line_id.max(line);
        self
    }

    /// Check cross-references the per-type deserializers cannot see.
    ///
    /// Line chains are already checked when each line is decoded.
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut station_ids = HashSet::new();
        for station in &self.stations {
            if !station_ids.insert(station.id) {
                return Err(StoreError::Invalid {
                    message: format!("duplicate station id {}", station.id),
                });
            }
        }

        let mut line_ids = HashSet::new();
        for line in &self.lines {
            if !line_ids.insert(line.id()) {
                return Err(StoreError::Invalid {
                    message: format!("duplicate line id {}", line.id()),
                });
            }
            if let Some(missing) = line
                .stations()
                .into_iter()
                .find(|id| !station_ids.contains(id))
            {
                return Err(StoreError::Invalid {
                    message: format!("line {} references unknown station {}", line.id(), missing),
                });
            }
        }
        Ok(())
    }
}

/// Location of the snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot.
    ///
    /// Returns `Ok(None)` if no snapshot has been written yet.
    pub fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        snapshot.validate()?;
        Ok(Some(snapshot))
    }

    /// Atomically replace the snapshot on disk.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("tmp");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
