/*
 * Responsibility
 * - Users request/response DTO
 * - validate() does the shape checks; password length limits live in PasswordHasher
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::user_repo::UserRow;

/// Body of both `POST /users` and `PUT /users`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub is_chirpy_red: bool,
}

// The password hash never leaves the repo layer.
impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            email: row.email,
            is_chirpy_red: row.is_chirpy_red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_email_or_empty_password_is_rejected() {
        let req = CredentialsRequest {
            email: "  ".into(),
            password: "x".into(),
        };
        assert_eq!(req.validate(), Err("email is required"));

        let req = CredentialsRequest {
            email: "a@b.com".into(),
            password: String::new(),
        };
        assert_eq!(req.validate(), Err("password is required"));
    }

    #[test]
    fn user_response_omits_hash() {
        let now = Utc::now();
        let res = UserResponse::from(UserRow {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: "a@b.com".into(),
            hashed_password: "$2b$04$secret".into(),
            is_chirpy_red: false,
        });

        let json = serde_json::to_value(&res).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["is_chirpy_red"], false);
    }
}
