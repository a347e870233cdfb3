/*
 * Responsibility
 * - POST /login, /refresh, /revoke
 * - /refresh and /revoke take the refresh token as `Authorization: Bearer <token>`
 * - all of the actual work happens in TokenService
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::{
    api::v1::{
        dto::auth::{LoginRequest, LoginResponse, RefreshResponse},
        extractors::JsonBody,
    },
    error::AppError,
    services::auth::credentials,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let out = state
        .auth
        .login(req.email.trim(), &req.password, req.requested_ttl())
        .await?;

    Ok(Json(LoginResponse {
        user: out.user.into(),
        token: out.access_token,
        refresh_token: out.refresh_token,
    }))
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    let refresh_token = credentials::bearer_token(&headers)?;
    let token = state.auth.refresh(refresh_token).await?;

    Ok(Json(RefreshResponse { token }))
}

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let refresh_token = credentials::bearer_token(&headers)?;
    state.auth.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}
