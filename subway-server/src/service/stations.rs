//! Station service: a thin shell over the directory.

use std::sync::Arc;

use tracing::info;

use crate::domain::StationId;
use crate::store::{LineRepository, StationDirectory};

use super::error::ServiceError;
use super::guard::ReferenceGuard;
use super::view::StationView;

/// Station CRUD, refusing to delete stations that lines still use.
pub struct StationService<S, L> {
    stations: Arc<S>,
    lines: Arc<L>,
    guard: ReferenceGuard,
}

impl<S, L> Clone for StationService<S, L> {
    fn clone(&self) -> Self {
        Self {
            stations: self.stations.clone(),
            lines: self.lines.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<S: StationDirectory, L: LineRepository> StationService<S, L> {
    pub fn new(stations: Arc<S>, lines: Arc<L>, guard: ReferenceGuard) -> Self {
        Self {
            stations,
            lines,
            guard,
        }
    }

    pub async fn create_station(&self, name: String) -> StationView {
        let station = self.stations.create(name).await;
        info!(station = %station.id, name = %station.name, "created station");
        station.into()
    }

    pub async fn list_stations(&self) -> Vec<StationView> {
        self.stations
            .list()
            .await
            .into_iter()
            .map(StationView::from)
            .collect()
    }

    pub async fn get_station(&self, id: StationId) -> Result<StationView, ServiceError> {
        self.stations
            .find(id)
            .await
            .map(StationView::from)
            .ok_or(ServiceError::StationNotFound(id))
    }

    pub async fn update_station(
        &self,
        id: StationId,
        name: String,
    ) -> Result<StationView, ServiceError> {
        let station = self
            .stations
            .rename(id, name)
            .await
            .ok_or(ServiceError::StationNotFound(id))?;
        info!(station = %id, name = %station.name, "renamed station");
        Ok(station.into())
    }

    /// Delete a station that no line refers to.
    pub async fn delete_station(&self, id: StationId) -> Result<(), ServiceError> {
        let _retiring = self.guard.retire().await;
        if let Some(line) = self
            .lines
            .list()
            .await
            .into_iter()
            .find(|line| line.contains(id))
        {
            return Err(ServiceError::StationInUse {
                station: id,
                line: line.id(),
            });
        }
        self.stations
            .delete(id)
            .await
            .ok_or(ServiceError::StationNotFound(id))?;
        info!(station = %id, "deleted station");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, NewLine, Station};
    use crate::service::LineService;
    use crate::store::{LineStore, StationStore};

    fn service() -> (StationService<StationStore, LineStore>, Arc<LineStore>) {
        let lines = Arc::new(LineStore::new());
        let service = StationService::new(
            Arc::new(StationStore::new()),
            lines.clone(),
            ReferenceGuard::new(),
        );
        (service, lines)
    }

    #[tokio::test]
    async fn create_list_get() {
        let (service, _) = service();
        let gangnam = service.create_station("Gangnam".into()).await;
        service.create_station("Isu".into()).await;

        let names: Vec<_> = service
            .list_stations()
            .await
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Gangnam", "Isu"]);
        assert_eq!(service.get_station(gangnam.id).await.unwrap(), gangnam);
    }

    #[tokio::test]
    async fn update_station() {
        let (service, _) = service();
        let gangnam = service.create_station("Gangnam".into()).await;
        let renamed = service
            .update_station(gangnam.id, "Yeongdeungpo".into())
            .await
            .unwrap();
        assert_eq!(renamed.name, "Yeongdeungpo");
        assert_eq!(
            service.get_station(gangnam.id).await.unwrap().name,
            "Yeongdeungpo"
        );
    }

    #[tokio::test]
    async fn delete_station() {
        let (service, _) = service();
        let gangnam = service.create_station("Gangnam".into()).await;
        service.delete_station(gangnam.id).await.unwrap();
        assert_eq!(
            service.get_station(gangnam.id).await.unwrap_err(),
            ServiceError::StationNotFound(gangnam.id)
        );
        assert_eq!(
            service.delete_station(gangnam.id).await.unwrap_err(),
            ServiceError::StationNotFound(gangnam.id)
        );
    }

    #[tokio::test]
    async fn station_on_a_line_cannot_be_deleted() {
        let (service, lines) = service();
        let a = service.create_station("A".into()).await;
        let b = service.create_station("B".into()).await;
        lines
            .create(NewLine::new("L", "c", a.id, b.id, 5).unwrap())
            .await;

        assert_eq!(
            service.delete_station(b.id).await.unwrap_err(),
            ServiceError::StationInUse {
                station: b.id,
                line: LineId(1)
            }
        );
        assert!(service.get_station(b.id).await.is_ok());
    }

    /// Directory whose lookups give other tasks a chance to run.
    struct SlowLookups(StationStore);

    impl StationDirectory for SlowLookups {
        async fn create(&self, name: String) -> Station {
            self.0.create(name).await
        }

        async fn list(&self) -> Vec<Station> {
            self.0.list().await
        }

        async fn find(&self, id: StationId) -> Option<Station> {
            tokio::task::yield_now().await;
            self.0.find(id).await
        }

        async fn rename(&self, id: StationId, name: String) -> Option<Station> {
            self.0.rename(id, name).await
        }

        async fn delete(&self, id: StationId) -> Option<Station> {
            self.0.delete(id).await
        }
    }

    #[tokio::test]
    async fn delete_during_add_section_never_orphans_a_reference() {
        let stations = Arc::new(SlowLookups(StationStore::new()));
        let lines = Arc::new(LineStore::new());
        let guard = ReferenceGuard::new();
        let line_service = LineService::new(stations.clone(), lines.clone(), guard.clone());
        let station_service = StationService::new(stations.clone(), lines.clone(), guard);

        let a = station_service.create_station("A".into()).await;
        let b = station_service.create_station("B".into()).await;
        let c = station_service.create_station("C".into()).await;
        let line = line_service
            .create_line("L".into(), "c".into(), a.id, b.id, 10)
            .await
            .unwrap();

        let (added, deleted) = tokio::join!(
            line_service.add_section(line.id, b.id, c.id, 4),
            async {
                for _ in 0..10 {
                    tokio::task::yield_now().await;
                }
                station_service.delete_station(c.id).await
            }
        );

        let added = added.unwrap();
        assert_eq!(added.stations, vec![a.clone(), b.clone(), c.clone()]);
        assert_eq!(
            deleted.unwrap_err(),
            ServiceError::StationInUse {
                station: c.id,
                line: line.id
            }
        );
        assert_eq!(line_service.get_line(line.id).await.unwrap(), added);
        assert_eq!(line_service.list_lines().await.unwrap(), vec![added]);
    }

    #[tokio::test]
    async fn add_section_after_delete_leaves_line_unchanged() {
        let stations = Arc::new(SlowLookups(StationStore::new()));
        let lines = Arc::new(LineStore::new());
        let guard = ReferenceGuard::new();
        let line_service = LineService::new(stations.clone(), lines.clone(), guard.clone());
        let station_service = StationService::new(stations.clone(), lines.clone(), guard);

        let a = station_service.create_station("A".into()).await;
        let b = station_service.create_station("B".into()).await;
        let c = station_service.create_station("C".into()).await;
        let line = line_service
            .create_line("L".into(), "c".into(), a.id, b.id, 10)
            .await
            .unwrap();

        let (deleted, added) = tokio::join!(
            station_service.delete_station(c.id),
            line_service.add_section(line.id, b.id, c.id, 4)
        );

        deleted.unwrap();
        assert_eq!(added.unwrap_err(), ServiceError::StationNotFound(c.id));
        assert_eq!(line_service.get_line(line.id).await.unwrap(), line);
    }
}
