use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use thiserror::Error;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::error::RepoError;
use crate::repos::refresh_token_repo::{RefreshTokenRepo, RefreshTokenRow};
use crate::services::auth::access_jwt::{AccessJwtError, AccessTokenCodec};

/// Refresh tokens live for 60 days from issuance.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

// 32 bytes = 256 bits of entropy, hex-encoded to 64 chars.
const REFRESH_TOKEN_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum RefreshTokenError {
    /// Unknown, revoked or expired. Deliberately not told apart for the client.
    #[error("refresh token is not usable")]
    Unauthorized,

    /// Revoke of a token that was never issued.
    #[error("refresh token not found")]
    NotFound,

    #[error("os random source failed: {0}")]
    Random(getrandom::Error),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    AccessToken(#[from] AccessJwtError),
}

impl From<RefreshTokenError> for AppError {
    fn from(e: RefreshTokenError) -> Self {
        match e {
            // Token existence is not revealed: not-found is reported as 401.
            RefreshTokenError::Unauthorized | RefreshTokenError::NotFound => {
                AppError::Unauthorized
            }
            RefreshTokenError::AccessToken(inner) => inner.into(),
            RefreshTokenError::Random(_) | RefreshTokenError::Repo(_) => {
                error!(error = %e, "refresh token storage failure");
                AppError::Internal
            }
        }
    }
}

/// Opaque, persisted refresh tokens.
///
/// - Tokens are not rotated on redeem: the same token keeps working until it expires or is
///   revoked.
/// - A user may hold any number of live tokens (one per device).
#[derive(Clone)]
pub struct RefreshTokenService {
    repo: Arc<dyn RefreshTokenRepo>,
    ttl: ChronoDuration,
}

impl std::fmt::Debug for RefreshTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenService")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl RefreshTokenService {
    pub fn new(repo: Arc<dyn RefreshTokenRepo>) -> Self {
        Self {
            repo,
            ttl: ChronoDuration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }

    /// Issue a new refresh token for `user_id` and store it.
    ///
    /// Returns the opaque refresh token string. A collision on the token value is treated as a
    /// storage failure, not retried.
    pub async fn issue(&self, user_id: Uuid) -> Result<String, RefreshTokenError> {
        let token = generate_refresh_token()?;
        let expires_at = Utc::now() + self.ttl;

        debug!(user_id = %user_id, expires_at = %expires_at, "Issuing refresh token");

        self.repo
            .insert(&token, user_id, expires_at)
            .await
            .map_err(|e| {
                error!(user_id = %user_id, error = %e, "Failed to insert refresh token");
                RefreshTokenError::Repo(e)
            })?;

        Ok(token)
    }

    /// Exact-match lookup. Returns the row whatever its state.
    pub async fn lookup(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRow>, RefreshTokenError> {
        Ok(self.repo.find_by_token(token).await?)
    }

    /// Exchange a live refresh token for a fresh access token (standard 1 hour lifetime).
    pub async fn redeem(
        &self,
        token: &str,
        codec: &AccessTokenCodec,
    ) -> Result<String, RefreshTokenError> {
        self.redeem_at(token, codec, Utc::now()).await
    }

    async fn redeem_at(
        &self,
        token: &str,
        codec: &AccessTokenCodec,
        now: DateTime<Utc>,
    ) -> Result<String, RefreshTokenError> {
        let row = match self.lookup(token).await? {
            Some(r) => r,
            None => {
                debug!("Refresh token not found");
                return Err(RefreshTokenError::Unauthorized);
            }
        };

        if !row.is_active(now) {
            warn!(
                user_id = %row.user_id,
                revoked = row.revoked_at.is_some(),
                expires_at = %row.expires_at,
                "Inactive refresh token presented"
            );
            return Err(RefreshTokenError::Unauthorized);
        }

        Ok(codec.issue(row.user_id, None)?)
    }

    /// Revoke a refresh token by its raw value.
    ///
    /// Revoking an already revoked token succeeds and keeps the original revocation time.
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenError> {
        let now = Utc::now();

        let changed = self.repo.revoke(token, now).await?;
        if changed > 0 {
            debug!(revoked_at = %now, "Revoked refresh token");
            return Ok(());
        }

        // Nothing changed: either already revoked (fine) or never issued.
        match self.lookup(token).await? {
            Some(row) => {
                debug!(user_id = %row.user_id, "Refresh token already revoked");
                Ok(())
            }
            None => Err(RefreshTokenError::NotFound),
        }
    }
}

fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    getrandom::fill(&mut bytes).map_err(RefreshTokenError::Random)?;
    Ok(hex::encode(bytes))
}
