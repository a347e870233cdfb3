//! In-memory repositories for handler and service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::chirp_repo::{ChirpRepo, ChirpRow, SortOrder};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::refresh_token_repo::{RefreshTokenRepo, RefreshTokenRow};
use crate::repos::user_repo::{UserRepo, UserRow};

#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<HashMap<Uuid, UserRow>>,
}

impl MemoryUserRepo {
    pub fn get(&self, user_id: Uuid) -> Option<UserRow> {
        self.users.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(&self, email: &str, hashed_password: &str) -> RepoResult<UserRow> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(RepoError::Conflict);
        }

        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            is_chirpy_red: false,
        };
        users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> RepoResult<Option<UserRow>> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email && u.id != user_id) {
            return Err(RepoError::Conflict);
        }

        Ok(users.get_mut(&user_id).map(|u| {
            u.email = email.to_string();
            u.hashed_password = hashed_password.to_string();
            u.updated_at = Utc::now();
            u.clone()
        }))
    }

    async fn upgrade_to_red(&self, user_id: Uuid) -> RepoResult<bool> {
        let mut users = self.users.lock().unwrap();
        Ok(users
            .get_mut(&user_id)
            .map(|u| u.is_chirpy_red = true)
            .is_some())
    }

    async fn delete_all(&self) -> RepoResult<u64> {
        let mut users = self.users.lock().unwrap();
        let removed = users.len() as u64;
        users.clear();
        Ok(removed)
    }
}

#[derive(Default)]
pub struct MemoryRefreshTokenRepo {
    tokens: Mutex<HashMap<String, RefreshTokenRow>>,
}

impl MemoryRefreshTokenRepo {
    /// Store a row as-is (lets tests plant already-expired tokens).
    pub fn put(&self, row: RefreshTokenRow) {
        self.tokens.lock().unwrap().insert(row.token.clone(), row);
    }
}

#[async_trait]
impl RefreshTokenRepo for MemoryRefreshTokenRepo {
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshTokenRow> {
        let mut tokens = self.tokens.lock().unwrap();
        if tokens.contains_key(token) {
            return Err(RepoError::Conflict);
        }

        let now = Utc::now();
        let row = RefreshTokenRow {
            token: token.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
            expires_at,
            revoked_at: None,
        };
        tokens.insert(row.token.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshTokenRow>> {
        Ok(self.tokens.lock().unwrap().get(token).cloned())
    }

    async fn revoke(&self, token: &str, now: DateTime<Utc>) -> RepoResult<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.get_mut(token) {
            Some(row) if row.revoked_at.is_none() => {
                row.revoked_at = Some(now);
                row.updated_at = now;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[derive(Default)]
pub struct MemoryChirpRepo {
    chirps: Mutex<Vec<ChirpRow>>,
}

#[async_trait]
impl ChirpRepo for MemoryChirpRepo {
    async fn create(&self, body: &str, user_id: Uuid) -> RepoResult<ChirpRow> {
        let now = Utc::now();
        let row = ChirpRow {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id,
        };
        self.chirps.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list(&self, author: Option<Uuid>, order: SortOrder) -> RepoResult<Vec<ChirpRow>> {
        let mut rows: Vec<ChirpRow> = self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .filter(|c| author.is_none_or(|a| c.user_id == a))
            .cloned()
            .collect();

        // Vec keeps insertion order, which already is created_at order.
        if order == SortOrder::Desc {
            rows.reverse();
        }
        Ok(rows)
    }

    async fn get(&self, chirp_id: Uuid) -> RepoResult<Option<ChirpRow>> {
        let chirps = self.chirps.lock().unwrap();
        Ok(chirps.iter().find(|c| c.id == chirp_id).cloned())
    }

    async fn delete(&self, chirp_id: Uuid) -> RepoResult<bool> {
        let mut chirps = self.chirps.lock().unwrap();
        let before = chirps.len();
        chirps.retain(|c| c.id != chirp_id);
        Ok(chirps.len() < before)
    }
}
