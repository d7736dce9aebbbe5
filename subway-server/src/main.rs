use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use subway_server::config::ServerConfig;
use subway_server::store::{LineStore, SnapshotFile, StationStore};
use subway_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("subway_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Restore the network from the snapshot, if persistence is enabled
    let snapshot = config.snapshot_path.as_ref().map(SnapshotFile::new);
    let (stations, lines) = match snapshot.as_ref().map(SnapshotFile::load).transpose()? {
        Some(Some(saved)) => {
            info!(
                stations = saved.stations.len(),
                lines = saved.lines.len(),
                "restored network from snapshot"
            );
            (
                StationStore::from_stations(saved.stations, saved.last_station_id),
                LineStore::from_lines(saved.lines, saved.last_line_id),
            )
        }
        _ => (StationStore::new(), LineStore::new()),
    };

    let state = AppState::new(stations, lines, snapshot);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Subway network server listening on http://{}", config.addr);
    info!("  GET    /health");
    info!("  GET    /stations, POST /stations");
    info!("  GET    /lines, POST /lines");
    info!("  GET    /lines/:id, PUT /lines/:id, DELETE /lines/:id");
    info!("  POST   /lines/:id/sections");
    info!("  DELETE /lines/:id/sections?stationId=");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
