//! Line service: create, read, update, delete and section edits.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Line, LineId, NewLine, Section, StationId};
use crate::store::{LineRepository, StationDirectory};
use crate::topology;

use super::error::ServiceError;
use super::guard::ReferenceGuard;
use super::view::{LineView, StationView};

/// Shell around the topology engine for line requests.
pub struct LineService<S, L> {
    stations: Arc<S>,
    lines: Arc<L>,
    guard: ReferenceGuard,
}

impl<S, L> Clone for LineService<S, L> {
    fn clone(&self) -> Self {
        Self {
            stations: self.stations.clone(),
            lines: self.lines.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<S: StationDirectory, L: LineRepository> LineService<S, L> {
    /// `guard` must be the one given to the [`StationService`] over the
    /// same stores.
    ///
    /// [`StationService`]: super::StationService
    pub fn new(stations: Arc<S>, lines: Arc<L>, guard: ReferenceGuard) -> Self {
        Self {
            stations,
            lines,
            guard,
        }
    }

    /// Create a line seeded with a single section.
    pub async fn create_line(
        &self,
        name: String,
        color: String,
        up: StationId,
        down: StationId,
        distance: i64,
    ) -> Result<LineView, ServiceError> {
        let references = self.guard.reference().await;
        self.require_station(up).await?;
        self.require_station(down).await?;
        let new = NewLine::new(name, color, up, down, distance)?;

        let line = self.lines.create(new).await;
        drop(references);
        info!(line = %line.id(), name = line.name(), "created line");
        self.view(&line).await
    }

    pub async fn list_lines(&self) -> Result<Vec<LineView>, ServiceError> {
        let lines = self.lines.list().await;
        let mut views = Vec::with_capacity(lines.len());
        for line in &lines {
            views.push(self.view(line).await?);
        }
        Ok(views)
    }

    pub async fn get_line(&self, id: LineId) -> Result<LineView, ServiceError> {
        let line = self.find(id).await?;
        self.view(&line).await
    }

    /// Change a line's name and color.
    pub async fn update_line(
        &self,
        id: LineId,
        name: String,
        color: String,
    ) -> Result<(), ServiceError> {
        self.lines
            .modify(id, |line| {
                let mut next = line.clone();
                next.rename(name, color);
                Ok::<_, ServiceError>(next)
            })
            .await
            .ok_or(ServiceError::LineNotFound(id))??;
        info!(line = %id, "updated line");
        Ok(())
    }

    pub async fn delete_line(&self, id: LineId) -> Result<(), ServiceError> {
        if !self.lines.delete(id).await {
            return Err(ServiceError::LineNotFound(id));
        }
        info!(line = %id, "deleted line");
        Ok(())
    }

    /// Insert a section into a line's chain.
    pub async fn add_section(
        &self,
        id: LineId,
        up: StationId,
        down: StationId,
        distance: i64,
    ) -> Result<LineView, ServiceError> {
        let references = self.guard.reference().await;
        self.find(id).await?;
        self.require_station(up).await?;
        self.require_station(down).await?;
        let section = Section::from_raw(up, down, distance)?;

        let line = self
            .lines
            .modify(id, |line| topology::insert(line, section))
            .await
            .ok_or(ServiceError::LineNotFound(id))?
            .inspect_err(|e| debug!(line = %id, error = %e, "rejected section"))?;
        drop(references);

        info!(line = %id, %up, %down, distance, "added section");
        self.view(&line).await
    }

    /// Remove a station, and its incident sections, from a line's chain.
    pub async fn remove_section(&self, id: LineId, station: StationId) -> Result<(), ServiceError> {
        self.require_station(station).await?;

        self.lines
            .modify(id, |line| topology::remove(line, station))
            .await
            .ok_or(ServiceError::LineNotFound(id))?
            .inspect_err(|e| debug!(line = %id, error = %e, "rejected removal"))?;

        info!(line = %id, %station, "removed station from line");
        Ok(())
    }

    async fn find(&self, id: LineId) -> Result<Line, ServiceError> {
        self.lines
            .find(id)
            .await
            .ok_or(ServiceError::LineNotFound(id))
    }

    async fn require_station(&self, id: StationId) -> Result<(), ServiceError> {
        self.stations
            .find(id)
            .await
            .map(|_| ())
            .ok_or(ServiceError::StationNotFound(id))
    }

    /// Project a line into its read view, resolving station names.
    async fn view(&self, line: &Line) -> Result<LineView, ServiceError> {
        let mut stations = Vec::with_capacity(line.sections().len() + 1);
        for id in line.stations() {
            let station = self
                .stations
                .find(id)
                .await
                .ok_or(ServiceError::StationNotFound(id))?;
            stations.push(StationView::from(station));
        }
        Ok(LineView {
            id: line.id(),
            name: line.name().to_string(),
            color: line.color().to_string(),
            stations,
            distance: line.total_distance(),
        })
    }
}
