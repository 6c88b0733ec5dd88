use crate::infrastructure::http::middleware::{ApiError, ApiResult, AppState, SessionToken};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state
        .session_service
        .login(&request.username, &request.password)
        .await
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(LoginResponse {
        token,
        username: request.username,
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    axum::Extension(SessionToken(token)): axum::Extension<SessionToken>,
) -> ApiResult<StatusCode> {
    state.session_service.logout(&token).await;
    Ok(StatusCode::NO_CONTENT)
}
