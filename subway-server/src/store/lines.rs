//! In-memory line repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::{Line, LineId, NewLine};

use super::LineRepository;

/// Each line sits behind its own lock so that edits to different lines
/// never wait on each other.
type Slot = Arc<Mutex<Line>>;

#[derive(Debug, Default)]
struct LineTable {
    next_id: u64,
    lines: BTreeMap<LineId, Slot>,
}

/// Thread-safe line repository.
///
/// The outer lock guards the set of lines. Reads hold it only long enough
/// to find a line's slot; `modify` keeps its read guard until the edit is
/// stored, so a line cannot be deleted out from under a writer.
#[derive(Debug, Default)]
pub struct LineStore {
    inner: RwLock<LineTable>,
}

impl LineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding previously saved lines.
    ///
    /// `last_id` is the last id handed out before the save; new ids continue
    /// after it, or after the largest id present if that is higher.
    pub fn from_lines(lines: Vec<Line>, last_id: u64) -> Self {
        let next_id = lines
            .iter()
            .map(|l| l.id().0)
            .max()
            .unwrap_or(0)
            .max(last_id);
        let lines = lines
            .into_iter()
            .map(|l| (l.id(), Arc::new(Mutex::new(l))))
            .collect();
        Self {
            inner: RwLock::new(LineTable { next_id, lines }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.lines.len()
    }

    /// The most recently allocated line id, or 0 if none has been.
    pub async fn last_id(&self) -> u64 {
        self.inner.read().await.next_id
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.lines.is_empty()
    }

    async fn slot(&self, id: LineId) -> Option<Slot> {
        self.inner.read().await.lines.get(&id).cloned()
    }
}

impl LineRepository for LineStore {
    async fn create(&self, new: NewLine) -> Line {
        let mut table = self.inner.write().await;
        table.next_id += 1;
        let line = new.into_line(LineId(table.next_id));
        table
            .lines
            .insert(line.id(), Arc::new(Mutex::new(line.clone())));
        line
    }

    async fn list(&self) -> Vec<Line> {
        let slots: Vec<Slot> = self.inner.read().await.lines.values().cloned().collect();
        let mut lines = Vec::with_capacity(slots.len());
        for slot in slots {
            lines.push(slot.lock().await.clone());
        }
        lines
    }

    async fn find(&self, id: LineId) -> Option<Line> {
        let slot = self.slot(id).await?;
        let line = slot.lock().await.clone();
        Some(line)
    }

    async fn delete(&self, id: LineId) -> bool {
        self.inner.write().await.lines.remove(&id).is_some()
    }

    async fn modify<F, E>(&self, id: LineId, f: F) -> Option<Result<Line, E>>
    where
        F: FnOnce(&Line) -> Result<Line, E> + Send,
        E: Send,
    {
        let table = self.inner.read().await;
        let mut current = table.lines.get(&id)?.lock().await;
        let result = f(&*current).inspect(|next| *current = next.clone());
        Some(result)
    }
}
