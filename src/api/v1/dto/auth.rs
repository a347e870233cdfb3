use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::v1::dto::users::UserResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Requested access token lifetime. Missing, zero or above one hour all mean one hour.
    #[serde(default)]
    pub expires_in_seconds: Option<u64>,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("email and password are required");
        }
        Ok(())
    }

    pub fn requested_ttl(&self) -> Option<Duration> {
        self.expires_in_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
}
