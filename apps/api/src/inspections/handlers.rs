use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::inspections::reload::{reload_from_source, ReloadSummary};
use crate::inspections::stats::DashboardStats;
use crate::models::inspection::Inspection;
use crate::models::memo::Memo;
use crate::models::schedule::{Schedule, ScheduleRequest};
use crate::risk::pipeline::{markers, query, InspectionFilter, MapMarker};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct InspectionQuery {
    #[serde(default)]
    pub filter: InspectionFilter,
}

#[derive(Deserialize)]
pub struct CreateScheduleRequest {
    pub inspection_id: u32,
    #[serde(flatten)]
    pub schedule: ScheduleRequest,
}

#[derive(Deserialize)]
pub struct CreateMemoRequest {
    pub content: String,
}

/// GET /api/v1/inspections
pub async fn handle_list_inspections(
    State(state): State<AppState>,
    Query(params): Query<InspectionQuery>,
) -> Json<Vec<Inspection>> {
    let manager = state.inspections.read().await;
    Json(query(manager.inspections(), params.filter))
}

/// POST /api/v1/inspections/reload
pub async fn handle_reload(State(state): State<AppState>) -> Json<ReloadSummary> {
    Json(reload_from_source(&state).await)
}

/// POST /api/v1/inspections/:id/complete
/// Unknown ids are accepted and ignored.
pub async fn handle_complete(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> StatusCode {
    state.inspections.write().await.complete(id);
    StatusCode::NO_CONTENT
}

/// GET /api/v1/map/markers
pub async fn handle_markers(State(state): State<AppState>) -> Json<Vec<MapMarker>> {
    let manager = state.inspections.read().await;
    Json(markers(manager.inspections()))
}

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.inspections.read().await.stats())
}

/// GET /api/v1/schedules
pub async fn handle_list_schedules(State(state): State<AppState>) -> Json<Vec<Schedule>> {
    Json(state.inspections.read().await.upcoming_schedules())
}

/// POST /api/v1/schedules
pub async fn handle_create_schedule(
    State(state): State<AppState>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    let request = req.schedule.validate()?;

    let schedule = state
        .inspections
        .write()
        .await
        .add_schedule(req.inspection_id, request)
        .ok_or_else(|| AppError::NotFound(format!("Inspection {} not found", req.inspection_id)))?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

/// DELETE /api/v1/schedules/:id
pub async fn handle_delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    state.inspections.write().await.remove_schedule(id);
    StatusCode::NO_CONTENT
}

/// GET /api/v1/memos
pub async fn handle_list_memos(State(state): State<AppState>) -> Json<Vec<Memo>> {
    Json(state.memos.read().await.list().to_vec())
}

/// POST /api/v1/memos
pub async fn handle_create_memo(
    State(state): State<AppState>,
    Json(req): Json<CreateMemoRequest>,
) -> Result<(StatusCode, Json<Memo>), AppError> {
    let memo = state.memos.write().await.add(&req.content)?;
    Ok((StatusCode::CREATED, Json(memo)))
}

/// DELETE /api/v1/memos/:id
pub async fn handle_delete_memo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    state.memos.write().await.delete(id);
    StatusCode::NO_CONTENT
}

/// DELETE /api/v1/memos
pub async fn handle_clear_memos(State(state): State<AppState>) -> StatusCode {
    state.memos.write().await.clear();
    StatusCode::NO_CONTENT
}
