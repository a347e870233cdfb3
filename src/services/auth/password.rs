//! Password hashing (bcrypt).
//!
//! The work factor is a fixed, configured cost. The length of the password never feeds into it.
//! bcrypt is CPU-bound, so both operations run on tokio's blocking pool.

use thiserror::Error;
use tokio::task::{self, JoinError};
use tracing::error;

use crate::error::AppError;

pub const DEFAULT_HASH_COST: u32 = 12;
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;

// bcrypt only looks at the first 72 bytes.
const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password is empty")]
    Empty,

    #[error("password exceeds 72 bytes")]
    TooLong,

    #[error("failed to hash password: {0}")]
    Hash(#[source] bcrypt::BcryptError),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(#[source] bcrypt::BcryptError),

    #[error("password worker failed: {0}")]
    Worker(#[source] JoinError),
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::Empty => AppError::invalid_request("password is required"),
            PasswordError::TooLong => AppError::invalid_request("password is too long"),
            PasswordError::Hash(_)
            | PasswordError::MalformedHash(_)
            | PasswordError::Worker(_) => {
                error!(error = %e, "password hashing failure");
                AppError::Internal
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_HASH_COST,
        }
    }
}

impl PasswordHasher {
    /// `cost` must already be validated against MIN_HASH_COST..=MAX_HASH_COST (see Config).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        if plaintext.is_empty() {
            return Err(PasswordError::Empty);
        }
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong);
        }

        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(PasswordError::Worker)?
            .map_err(PasswordError::Hash)
    }

    /// `Ok(false)` is a plain mismatch. `Err` means the stored hash itself is unusable.
    ///
    /// Input over 72 bytes never matches: `hash` refuses it, and bcrypt would otherwise compare
    /// only its first 72 bytes.
    pub async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
            .await
            .map_err(PasswordError::Worker)?
            .map_err(PasswordError::MalformedHash)
    }
}
