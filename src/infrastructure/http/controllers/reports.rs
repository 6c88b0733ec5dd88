use crate::domain::entities::parse_date;
use crate::domain::services::{OccupancyReport, ReportPeriod};
use crate::infrastructure::http::middleware::{ApiResult, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub date: Option<String>,
}

/// GET /api/reports/:period?date - daily, weekly or monthly occupancy
pub async fn occupancy_report(
    State(state): State<AppState>,
    Path(period): Path<String>,
    Query(params): Query<ReportParams>,
) -> ApiResult<Json<OccupancyReport>> {
    let period: ReportPeriod = period.parse()?;
    let date = match params.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => chrono::Local::now().date_naive(),
    };

    Ok(Json(state.report_service.report(period, date).await?))
}
