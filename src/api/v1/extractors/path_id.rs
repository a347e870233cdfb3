/*
 * Responsibility
 * - Take a `{..._id}` path segment and parse it as a Uuid
 * - Failures become AppError::InvalidRequest (400) with the usual error body
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub struct PathId(pub Uuid);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::invalid_request("missing path id"))?;

        Uuid::parse_str(&raw)
            .map(PathId)
            .map_err(|_| AppError::invalid_request("invalid id"))
    }
}
