use crate::domain::entities::{parse_date, CreateRoomRequest, Room, UpdateRoomRequest};
use crate::infrastructure::http::middleware::{ApiResult, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

/// GET /api/rooms
pub async fn list_rooms(State(state): State<AppState>) -> ApiResult<Json<Vec<Room>>> {
    Ok(Json(state.room_service.list_rooms().await?))
}

/// GET /api/rooms/:id
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Room>> {
    Ok(Json(state.room_service.get_room(&id).await?))
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> ApiResult<(StatusCode, Json<Room>)> {
    let room = state.room_service.create_room(request).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// PUT /api/rooms/:id
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRoomRequest>,
) -> ApiResult<Json<Room>> {
    Ok(Json(state.room_service.update_room(&id, request).await?))
}

/// DELETE /api/rooms/:id
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.room_service.delete_room(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ReconcileParams {
    pub date: Option<String>,
}

/// POST /api/rooms/reconcile - Re-derive room statuses, returns the rooms that changed
pub async fn reconcile_rooms(
    State(state): State<AppState>,
    Query(params): Query<ReconcileParams>,
) -> ApiResult<Json<Vec<Room>>> {
    let today = match params.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => chrono::Local::now().date_naive(),
    };
    Ok(Json(state.room_service.reconcile_statuses(today).await?))
}
