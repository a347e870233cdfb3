use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::error::AppError;
use crate::repos::user_repo::{UserRepo, UserRow};
use crate::services::auth::{
    access_jwt::AccessTokenCodec, password::PasswordHasher, refresh_token::RefreshTokenService,
};

/// Service that orchestrates login, refresh and revoke.
///
/// - PasswordHasher proves the caller knows the password.
/// - AccessTokenCodec mints and verifies access tokens (JWT).
/// - RefreshTokenService owns opaque refresh token issuance/revocation and DB persistence.
#[derive(Clone)]
pub struct TokenService {
    users: Arc<dyn UserRepo>,
    hasher: PasswordHasher,
    codec: AccessTokenCodec,
    refresh: RefreshTokenService,
}

impl TokenService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        hasher: PasswordHasher,
        codec: AccessTokenCodec,
        refresh: RefreshTokenService,
    ) -> Self {
        Self {
            users,
            hasher,
            codec,
            refresh,
        }
    }

    pub fn codec(&self) -> &AccessTokenCodec {
        &self.codec
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Verify email + password and issue a token pair.
    ///
    /// Unknown email and wrong password both come back as `Unauthorized`.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        requested_ttl: Option<Duration>,
    ) -> Result<LoginOutcome, AppError> {
        let user = match self.users.find_by_email(email).await? {
            Some(u) => u,
            None => {
                debug!("Login for unknown email");
                return Err(AppError::Unauthorized);
            }
        };

        if !self.hasher.verify(password, &user.hashed_password).await? {
            debug!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::Unauthorized);
        }

        // Access token (JWT)
        let access_token = self.codec.issue(user.id, requested_ttl)?;

        // Refresh token (opaque)
        let refresh_token = self.refresh.issue(user.id).await.map_err(|e| {
            error!(user_id = %user.id, error = %e, "Failed to issue refresh token at login");
            AppError::from(e)
        })?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Refresh an access token using a refresh token.
    ///
    /// - validate the refresh token (exists + not expired + not revoked)
    /// - issue a new access token for the same subject
    /// - the refresh token itself is left untouched (no rotation)
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        Ok(self.refresh.redeem(refresh_token, &self.codec).await?)
    }

    /// Revoke a refresh token. Unknown tokens are reported as `Unauthorized`.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AppError> {
        Ok(self.refresh.revoke(refresh_token).await?)
    }
}

/// Service-level return type to keep handlers thin.
///
/// Handlers map this into the HTTP DTO (LoginResponse).
#[derive(Clone, Debug)]
pub struct LoginOutcome {
    pub user: UserRow,
    pub access_token: String,
    pub refresh_token: String,
}
