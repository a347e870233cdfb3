/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The access middleware builds it and stores it in request extensions
 *
 * Notes
 * - The only constructor verifies a bearer access token, so a handler holding an AuthCtx
 *   holds a verified identity; there is no way to build one from a bare Uuid
 */
use axum::http::HeaderMap;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::{AccessTokenCodec, credentials};

/// Context attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    user_id: Uuid,
}

impl AuthCtx {
    /// UNVERIFIED -> VERIFIED: bearer token present and valid, or `Unauthorized`.
    pub fn authenticate(headers: &HeaderMap, codec: &AccessTokenCodec) -> Result<Self, AppError> {
        let token = credentials::bearer_token(headers)?;
        let user_id = codec.verify(token)?;
        Ok(Self { user_id })
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}
