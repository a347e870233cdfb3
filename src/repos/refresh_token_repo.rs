use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

/// DB access for refresh token persistence.
///
/// Notes:
/// - Every operation is a single statement, so it is atomic at the storage layer.
/// - `revoked_at` is only ever written once (`WHERE revoked_at IS NULL`).
#[async_trait]
pub trait RefreshTokenRepo: Send + Sync {
    /// Insert a newly issued refresh token.
    ///
    /// A duplicate token value comes back as `RepoError::Conflict`.
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshTokenRow>;

    /// Exact-match lookup, regardless of expiry or revocation.
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshTokenRow>>;

    /// Revoke a token that is not revoked yet.
    ///
    /// Returns the number of rows changed (0 if missing or already revoked).
    async fn revoke(&self, token: &str, now: DateTime<Utc>) -> RepoResult<u64>;
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRow {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRow {
    /// Usable for renewal iff not revoked and not yet expired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}

#[derive(Clone, Debug)]
pub struct PgRefreshTokenRepo {
    pool: PgPool,
}

impl PgRefreshTokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepo for PgRefreshTokenRepo {
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshTokenRow> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            INSERT INTO refresh_tokens (token, user_id, created_at, updated_at, expires_at)
            VALUES ($1, $2, NOW(), NOW(), $3)
            RETURNING token, user_id, created_at, updated_at, expires_at, revoked_at
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshTokenRow>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT token, user_id, created_at, updated_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn revoke(&self, token: &str, now: DateTime<Utc>) -> RepoResult<u64> {
        let done = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2,
                updated_at = $2
            WHERE token = $1
                AND revoked_at IS NULL
            "#,
        )
        .bind(token)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected())
    }
}
