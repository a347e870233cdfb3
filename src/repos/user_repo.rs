/*
 * Responsibility
 * - SQLx access to the users table
 * - The only place that reads or writes hashed_password
 * - Unique email violations surface as RepoError::Conflict
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
    pub is_chirpy_red: bool,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, email: &str, hashed_password: &str) -> RepoResult<UserRow>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>>;

    // Returns None when the user no longer exists.
    async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> RepoResult<Option<UserRow>>;

    // Returns false when no user matched.
    async fn upgrade_to_red(&self, user_id: Uuid) -> RepoResult<bool>;

    // Wipes every user; chirps and refresh tokens go with them (ON DELETE CASCADE).
    async fn delete_all(&self) -> RepoResult<u64>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(&self, email: &str, hashed_password: &str) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, created_at, updated_at, email, hashed_password)
            VALUES (gen_random_uuid(), NOW(), NOW(), $1, $2)
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET email = $2,
                hashed_password = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(hashed_password)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn upgrade_to_red(&self, user_id: Uuid) -> RepoResult<bool> {
        let done = sqlx::query(
            r#"
            UPDATE users
            SET is_chirpy_red = TRUE,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected() > 0)
    }

    async fn delete_all(&self) -> RepoResult<u64> {
        let done = sqlx::query("DELETE FROM users").execute(&self.pool).await?;

        Ok(done.rows_affected())
    }
}
