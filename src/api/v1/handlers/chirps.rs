/*
 * Responsibility
 * - /chirps handlers
 * - create/delete are behind the access middleware; list/get are public
 * - only the author may delete a chirp (403 otherwise)
 */
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use tracing::{debug, info};

use crate::{
    api::v1::{
        dto::chirps::{ChirpResponse, CreateChirpRequest, ListChirpsQuery},
        extractors::{AuthCtxExtractor, JsonBody, PathId},
    },
    error::AppError,
    state::AppState,
};

pub async fn create_chirp(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<CreateChirpRequest>,
) -> Result<(StatusCode, Json<ChirpResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let row = state.chirps.create(&req.body, ctx.user_id()).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn list_chirps(
    State(state): State<AppState>,
    query: Result<Query<ListChirpsQuery>, QueryRejection>,
) -> Result<Json<Vec<ChirpResponse>>, AppError> {
    let Query(query) = query.map_err(|e| {
        debug!(error = %e, "rejected chirp list query");
        AppError::invalid_request("invalid query string")
    })?;
    let order = query.sort_order().map_err(AppError::invalid_request)?;

    let rows = state.chirps.list(query.author_id, order).await?;

    Ok(Json(rows.into_iter().map(ChirpResponse::from).collect()))
}

pub async fn get_chirp(
    State(state): State<AppState>,
    PathId(chirp_id): PathId,
) -> Result<Json<ChirpResponse>, AppError> {
    let row = state
        .chirps
        .get(chirp_id)
        .await?
        .ok_or(AppError::NotFound("chirp"))?;

    Ok(Json(row.into()))
}

pub async fn delete_chirp(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    PathId(chirp_id): PathId,
) -> Result<StatusCode, AppError> {
    let row = state
        .chirps
        .get(chirp_id)
        .await?
        .ok_or(AppError::NotFound("chirp"))?;

    if row.user_id != ctx.user_id() {
        debug!(%chirp_id, user_id = %ctx.user_id(), "delete of someone else's chirp");
        return Err(AppError::Forbidden);
    }

    // A concurrent delete between get and delete is still a 404.
    if !state.chirps.delete(chirp_id).await? {
        return Err(AppError::NotFound("chirp"));
    }

    info!(%chirp_id, user_id = %ctx.user_id(), "chirp deleted");
    Ok(StatusCode::NO_CONTENT)
}
