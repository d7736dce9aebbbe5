//! Ordering between station deletion and line writes.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock shared by the line and station services.
///
/// Line writes that add station references hold it shared from the
/// station lookup until the line is stored. Station deletion holds it
/// exclusively from the usage scan until the station is gone, so a line
/// never ends up referring to a deleted station.
#[derive(Debug, Clone, Default)]
pub struct ReferenceGuard {
    lock: Arc<RwLock<()>>,
}

impl ReferenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn reference(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().await
    }

    pub(crate) async fn retire(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().await
    }
}
