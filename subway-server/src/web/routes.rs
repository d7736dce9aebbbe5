//! HTTP route handlers.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::domain::{LineId, StationId, TopologyError};
use crate::service::ServiceError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations).post(create_station))
        .route(
            "/stations/:id",
            get(get_station).put(update_station).delete(delete_station),
        )
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/:id",
            get(get_line).put(update_line).delete(delete_line),
        )
        .route(
            "/lines/:id/sections",
            post(add_section).delete(remove_section),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, reporting failures as 400 with our error shape.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest {
        code: "bad_request",
        message: format!("Invalid JSON: {e}"),
    })
}

/// 201 with a `Location` header pointing at the new resource.
fn created<T: serde::Serialize>(location: String, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}

// Stations

async fn create_station(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: StationRequest = parse_json(&body)?;
    let station = state.stations.create_station(req.name).await;
    state.checkpoint().await;
    Ok(created(
        format!("/stations/{}", station.id),
        StationResponse::from(station),
    ))
}

async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let stations = state.stations.list_stations().await;
    Json(stations.into_iter().map(StationResponse::from).collect())
}

async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<StationResponse>, AppError> {
    let station = state.stations.get_station(StationId(id)).await?;
    Ok(Json(station.into()))
}

async fn update_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<Json<StationResponse>, AppError> {
    let req: StationRequest = parse_json(&body)?;
    let station = state
        .stations
        .update_station(StationId(id), req.name)
        .await?;
    state.checkpoint().await;
    Ok(Json(station.into()))
}

async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.stations.delete_station(StationId(id)).await?;
    state.checkpoint().await;
    Ok(StatusCode::NO_CONTENT)
}

// Lines

async fn create_line(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: LineRequest = parse_json(&body)?;
    let line = state
        .lines
        .create_line(
            req.name,
            req.color,
            StationId(req.up_station_id),
            StationId(req.down_station_id),
            req.distance,
        )
        .await?;
    state.checkpoint().await;
    Ok(created(format!("/lines/{}", line.id), LineResponse::from(line)))
}

async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let lines = state.lines.list_lines().await?;
    Ok(Json(lines.into_iter().map(LineResponse::from).collect()))
}

async fn get_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<LineResponse>, AppError> {
    let line = state.lines.get_line(LineId(id)).await?;
    Ok(Json(line.into()))
}

async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let req: UpdateLineRequest = parse_json(&body)?;
    state
        .lines
        .update_line(LineId(id), req.name, req.color)
        .await?;
    state.checkpoint().await;
    Ok(StatusCode::OK)
}

async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.lines.delete_line(LineId(id)).await?;
    state.checkpoint().await;
    Ok(StatusCode::NO_CONTENT)
}

// Sections

async fn add_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: SectionRequest = parse_json(&body)?;
    let line = state
        .lines
        .add_section(
            LineId(id),
            StationId(req.up_station_id),
            StationId(req.down_station_id),
            req.distance,
        )
        .await?;
    state.checkpoint().await;
    Ok(created(format!("/lines/{}", line.id), LineResponse::from(line)))
}

async fn remove_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    query: Result<Query<RemoveSectionQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest {
        code: "bad_request",
        message: e.body_text(),
    })?;
    state
        .lines
        .remove_section(LineId(id), StationId(query.station_id))
        .await?;
    state.checkpoint().await;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { code: &'static str, message: String },
    NotFound { message: String },
    Conflict { code: &'static str, message: String },
    Unprocessable { code: &'static str, message: String },
}

impl From<TopologyError> for AppError {
    fn from(e: TopologyError) -> Self {
        let message = e.to_string();
        match e {
            TopologyError::InvalidSection(_) => AppError::BadRequest {
                code: "invalid_section",
                message,
            },
            TopologyError::DuplicateSection { .. } => AppError::Conflict {
                code: "duplicate_section",
                message,
            },
            TopologyError::DisconnectedSection { .. } => AppError::Unprocessable {
                code: "disconnected_section",
                message,
            },
            TopologyError::InvalidTopology { .. } => AppError::Unprocessable {
                code: "invalid_topology",
                message,
            },
            TopologyError::DistanceTooLong { .. } => AppError::Unprocessable {
                code: "distance_too_long",
                message,
            },
            TopologyError::StationNotInLine(_) => AppError::Unprocessable {
                code: "station_not_in_line",
                message,
            },
            TopologyError::MinimumSectionViolation => AppError::Unprocessable {
                code: "minimum_section_violation",
                message,
            },
            TopologyError::DistanceOverflow { .. } => AppError::Unprocessable {
                code: "distance_overflow",
                message,
            },
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Topology(e) => e.into(),
            ServiceError::LineNotFound(_) | ServiceError::StationNotFound(_) => {
                AppError::NotFound {
                    message: e.to_string(),
                }
            }
            ServiceError::StationInUse { .. } => AppError::Conflict {
                code: "station_in_use",
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, "not_found", message),
            AppError::Conflict { code, message } => (StatusCode::CONFLICT, code, message),
            AppError::Unprocessable { code, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, code, message)
            }
        };

        debug!(%status, code, "{message}");

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });
        (status, body).into_response()
    }
}
