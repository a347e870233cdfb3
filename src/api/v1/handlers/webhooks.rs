/*
 * Responsibility
 * - POST /polka/webhooks
 * - authenticated with `Authorization: ApiKey <POLKA_KEY>`, not a user token
 * - only `user.upgraded` does anything; other events are acknowledged and dropped
 */
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::{debug, info};

use crate::{
    api::v1::{
        dto::webhooks::{PolkaWebhookRequest, USER_UPGRADED_EVENT},
        extractors::JsonBody,
    },
    error::AppError,
    services::auth::credentials,
    state::AppState,
};

pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<JsonBody<PolkaWebhookRequest>, AppError>,
) -> Result<StatusCode, AppError> {
    // Key first: an unauthenticated caller learns nothing about the payload shape.
    credentials::require_api_key(&headers, &state.polka_key)?;
    let JsonBody(req) = body?;

    if req.event != USER_UPGRADED_EVENT {
        debug!(event = %req.event, "ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = req.data.user_id;
    if !state.users.upgrade_to_red(user_id).await? {
        return Err(AppError::NotFound("user"));
    }

    info!(%user_id, "user upgraded to Chirpy Red");
    Ok(StatusCode::NO_CONTENT)
}
