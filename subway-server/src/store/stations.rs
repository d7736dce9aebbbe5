//! In-memory station directory.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::domain::{Station, StationId};

use super::StationDirectory;

#[derive(Debug, Default)]
struct StationTable {
    next_id: u64,
    stations: BTreeMap<StationId, Station>,
}

/// Thread-safe station directory.
///
/// Ids are allocated sequentially starting from 1 and are not reused.
#[derive(Debug, Default)]
pub struct StationStore {
    inner: RwLock<StationTable>,
}

impl StationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding previously saved stations.
    ///
    /// New ids continue after `last_id`, the last id handed out before the
    /// save, or after the largest id present if that is higher.
    pub fn from_stations(stations: Vec<Station>, last_id: u64) -> Self {
        let next_id = stations
            .iter()
            .map(|s| s.id.0)
            .max()
            .unwrap_or(0)
            .max(last_id);
        let stations = stations.into_iter().map(|s| (s.id, s)).collect();
        Self {
            inner: RwLock::new(StationTable { next_id, stations }),
        }
    }

    /// Number of stations in the directory.
    pub async fn len(&self) -> usize {
        self.inner.read().await.stations.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.stations.is_empty()
    }

    /// The most recently allocated station id, or 0 if none has been.
    pub async fn last_id(&self) -> u64 {
        self.inner.read().await.next_id
    }
}

impl StationDirectory for StationStore {
    async fn create(&self, name: String) -> Station {
        let mut table = self.inner.write().await;
        table.next_id += 1;
        let station = Station::new(StationId(table.next_id), name);
        table.stations.insert(station.id, station.clone());
        station
    }

    async fn list(&self) -> Vec<Station> {
        self.inner.read().await.stations.values().cloned().collect()
    }

    async fn find(&self, id: StationId) -> Option<Station> {
        self.inner.read().await.stations.get(&id).cloned()
    }

    async fn rename(&self, id: StationId, name: String) -> Option<Station> {
        let mut table = self.inner.write().await;
        let station = table.stations.get_mut(&id)?;
        station.name = name;
        Some(station.clone())
    }

    async fn delete(&self, id: StationId) -> Option<Station> {
        self.inner.write().await.stations.remove(&id)
    }
}
