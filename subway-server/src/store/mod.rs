//! Station directory and line repository.
//!
//! The service layer talks to storage only through the
//! [`StationDirectory`] and [`LineRepository`] traits, so it can be tested
//! against any implementation. The in-memory stores here are the ones the
//! server runs with; [`SnapshotFile`] optionally mirrors their contents to
//! disk.

mod error;
mod lines;
mod snapshot;
mod stations;

use std::future::Future;

use crate::domain::{Line, LineId, NewLine, Station, StationId};

pub use error::StoreError;
pub use lines::LineStore;
pub use snapshot::{Snapshot, SnapshotFile};
pub use stations::StationStore;

/// Station lookup and lifecycle.
pub trait StationDirectory: Send + Sync {
    /// Register a new station and return it with its allocated id.
    fn create(&self, name: String) -> impl Future<Output = Station> + Send;

    /// All stations in id order.
    fn list(&self) -> impl Future<Output = Vec<Station>> + Send;

    fn find(&self, id: StationId) -> impl Future<Output = Option<Station>> + Send;

    /// Rename a station, returning the updated station if it exists.
    fn rename(&self, id: StationId, name: String)
    -> impl Future<Output = Option<Station>> + Send;

    /// Remove a station, returning it if it existed.
    fn delete(&self, id: StationId) -> impl Future<Output = Option<Station>> + Send;
}

/// Line persistence with a single-writer boundary per line.
pub trait LineRepository: Send + Sync {
    /// Store a new line and return it with its allocated id.
    fn create(&self, new: NewLine) -> impl Future<Output = Line> + Send;

    /// Snapshots of all lines in id order.
    fn list(&self) -> impl Future<Output = Vec<Line>> + Send;

    fn find(&self, id: LineId) -> impl Future<Output = Option<Line>> + Send;

    /// Remove a line. Returns `false` if it did not exist.
    fn delete(&self, id: LineId) -> impl Future<Output = bool> + Send;

    /// Replace a line with the result of `f` applied to its current state.
    ///
    /// Writers to the same line are serialized; `f` sees the state left by
    /// the previous writer. The stored line changes only when `f` returns
    /// `Ok`. Deleting the line waits for a modify already in progress.
    /// Returns `None` if the line does not exist.
    fn modify<F, E>(
        &self,
        id: LineId,
        f: F,
    ) -> impl Future<Output = Option<Result<Line, E>>> + Send
    where
        F: FnOnce(&Line) -> Result<Line, E> + Send,
        E: Send;
}
