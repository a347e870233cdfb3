/*
 * Responsibility
 * - POST /users (sign-up) and PUT /users (caller changes own email + password)
 * - PUT sits behind the access middleware; the caller comes from AuthCtx, never from the body
 */
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::{
    api::v1::{
        dto::users::{CredentialsRequest, UserResponse},
        extractors::{AuthCtxExtractor, JsonBody},
    },
    error::AppError,
    state::AppState,
};

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let hashed = state.auth.hasher().hash(&req.password).await?;
    let row = state.users.create(req.email.trim(), &hashed).await?;

    info!(user_id = %row.id, "user created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_user(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<Json<UserResponse>, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let hashed = state.auth.hasher().hash(&req.password).await?;
    let row = state
        .users
        .update_credentials(ctx.user_id(), req.email.trim(), &hashed)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    info!(user_id = %row.id, "user credentials updated");
    Ok(Json(row.into()))
}
