use crate::domain::entities::{Booking, CreateBookingRequest, UpdateBookingRequest};
use crate::infrastructure::http::middleware::{ApiResult, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// GET /api/bookings
pub async fn list_bookings(State(state): State<AppState>) -> ApiResult<Json<Vec<Booking>>> {
    Ok(Json(state.booking_service.list_bookings().await?))
}

/// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Booking>> {
    Ok(Json(state.booking_service.get_booking(&id).await?))
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let booking = state.booking_service.create_booking(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// PUT /api/bookings/:id - Partial update, status changes included
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBookingRequest>,
) -> ApiResult<Json<Booking>> {
    Ok(Json(state.booking_service.update_booking(&id, request).await?))
}
