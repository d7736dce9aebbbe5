//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::service::{LineService, ReferenceGuard, StationService};
use crate::store::{
    LineRepository, LineStore, Snapshot, SnapshotFile, StationDirectory, StationStore,
};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Line CRUD and section edits
    pub lines: LineService<StationStore, LineStore>,

    /// Station CRUD
    pub stations: StationService<StationStore, LineStore>,

    station_store: Arc<StationStore>,
    line_store: Arc<LineStore>,

    /// Snapshot target; the lock keeps concurrent checkpoints from
    /// interleaving their writes.
    snapshot: Option<Arc<Mutex<SnapshotFile>>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(stations: StationStore, lines: LineStore, snapshot: Option<SnapshotFile>) -> Self {
        let station_store = Arc::new(stations);
        let line_store = Arc::new(lines);
        let guard = ReferenceGuard::new();
        Self {
            lines: LineService::new(station_store.clone(), line_store.clone(), guard.clone()),
            stations: StationService::new(station_store.clone(), line_store.clone(), guard),
            station_store,
            line_store,
            snapshot: snapshot.map(|file| Arc::new(Mutex::new(file))),
        }
    }

    /// Empty state with no persistence.
    pub fn in_memory() -> Self {
        Self::new(StationStore::new(), LineStore::new(), None)
    }

    /// Write the current network to the snapshot file, if one is configured.
    ///
    /// Failures are logged; the mutation that triggered the checkpoint has
    /// already been applied in memory.
    pub async fn checkpoint(&self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let file = snapshot.lock().await;
        let state = Snapshot::new(self.station_store.list().await, self.line_store.list().await)
            .with_last_ids(
                self.station_store.last_id().await,
                self.line_store.last_id().await,
            );
        match file.save(&state) {
            Ok(()) => debug!(path = %file.path().display(), "wrote snapshot"),
            Err(e) => warn!(path = %file.path().display(), error = %e, "failed to write snapshot"),
        }
    }
}
