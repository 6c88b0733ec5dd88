use crate::domain::services::{AvailabilityQuery, AvailableRoom};
use crate::infrastructure::http::middleware::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub pax: Option<String>,
    /// Comma-separated rule ids, applied in order
    pub rules: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> ApiResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing required parameter: {}", name)))
}

/// GET /api/availability?start&end&pax&rules
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> ApiResult<Json<Vec<AvailableRoom>>> {
    let query = AvailabilityQuery::parse(
        required(&params.start, "start")?,
        required(&params.end, "end")?,
        required(&params.pax, "pax")?,
        params.rules.as_deref(),
    )?;

    Ok(Json(state.availability_service.search(&query).await?))
}
