use crate::application::services::{
    AvailabilityService, BookingService, PriceRuleService, ReportService, RoomService,
    SessionService,
};
use crate::infrastructure::http::middleware::error::ApiError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

#[derive(Clone)]
pub struct AppState {
    pub room_service: RoomService,
    pub booking_service: BookingService,
    pub price_rule_service: PriceRuleService,
    pub availability_service: AvailabilityService,
    pub report_service: ReportService,
    pub session_service: SessionService,
}

/// Token of an authenticated request, available to handlers as an extension.
#[derive(Clone, Debug)]
pub struct SessionToken(pub String);

/// Bearer token of the request, if any.
pub fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Reject requests without a token issued by the demo login.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    if !state.session_service.is_valid(&token).await {
        tracing::debug!("Rejected request with unknown token");
        return Err(ApiError::Unauthorized);
    }

    request.extensions_mut().insert(SessionToken(token));
    Ok(next.run(request).await)
}
