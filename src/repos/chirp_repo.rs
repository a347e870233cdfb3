/*
 * Responsibility
 * - chirps CRUD
 * - user_id is a FK with ON DELETE CASCADE, so chirps go away with their author
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChirpRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[async_trait]
pub trait ChirpRepo: Send + Sync {
    async fn create(&self, body: &str, user_id: Uuid) -> RepoResult<ChirpRow>;

    // Ordered by created_at; `author` narrows to one user.
    async fn list(&self, author: Option<Uuid>, order: SortOrder) -> RepoResult<Vec<ChirpRow>>;

    async fn get(&self, chirp_id: Uuid) -> RepoResult<Option<ChirpRow>>;

    async fn delete(&self, chirp_id: Uuid) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgChirpRepo {
    pool: PgPool,
}

impl PgChirpRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChirpRepo for PgChirpRepo {
    async fn create(&self, body: &str, user_id: Uuid) -> RepoResult<ChirpRow> {
        let row = sqlx::query_as::<_, ChirpRow>(
            r#"
            INSERT INTO chirps (id, created_at, updated_at, body, user_id)
            VALUES (gen_random_uuid(), NOW(), NOW(), $1, $2)
            RETURNING id, created_at, updated_at, body, user_id
            "#,
        )
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self, author: Option<Uuid>, order: SortOrder) -> RepoResult<Vec<ChirpRow>> {
        // ORDER BY direction cannot be bound as a parameter.
        let sql = match order {
            SortOrder::Asc => {
                r#"
                SELECT id, created_at, updated_at, body, user_id
                FROM chirps
                WHERE ($1::uuid IS NULL OR user_id = $1)
                ORDER BY created_at ASC
                "#
            }
            SortOrder::Desc => {
                r#"
                SELECT id, created_at, updated_at, body, user_id
                FROM chirps
                WHERE ($1::uuid IS NULL OR user_id = $1)
                ORDER BY created_at DESC
                "#
            }
        };

        let rows = sqlx::query_as::<_, ChirpRow>(sql)
            .bind(author)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn get(&self, chirp_id: Uuid) -> RepoResult<Option<ChirpRow>> {
        let row = sqlx::query_as::<_, ChirpRow>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(chirp_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, chirp_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(chirp_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
