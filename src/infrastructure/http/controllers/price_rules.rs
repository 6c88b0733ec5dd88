use crate::application::services::PriceQuote;
use crate::domain::entities::{PriceQuoteRequest, PriceRule, PriceRuleRequest};
use crate::infrastructure::http::middleware::{ApiResult, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// GET /api/pricing-rules
pub async fn list_rules(State(state): State<AppState>) -> ApiResult<Json<Vec<PriceRule>>> {
    Ok(Json(state.price_rule_service.list_rules().await?))
}

/// GET /api/pricing-rules/:id
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PriceRule>> {
    Ok(Json(state.price_rule_service.get_rule(&id).await?))
}

/// POST /api/pricing-rules
pub async fn create_rule(
    State(state): State<AppState>,
    Json(request): Json<PriceRuleRequest>,
) -> ApiResult<(StatusCode, Json<PriceRule>)> {
    let rule = state.price_rule_service.create_rule(request).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

/// PUT /api/pricing-rules/:id
pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PriceRuleRequest>,
) -> ApiResult<Json<PriceRule>> {
    Ok(Json(state.price_rule_service.update_rule(&id, request).await?))
}

/// DELETE /api/pricing-rules/:id
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.price_rule_service.delete_rule(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/pricing/quote
pub async fn quote(
    State(state): State<AppState>,
    Json(request): Json<PriceQuoteRequest>,
) -> ApiResult<Json<PriceQuote>> {
    Ok(Json(state.price_rule_service.quote(request).await?))
}
