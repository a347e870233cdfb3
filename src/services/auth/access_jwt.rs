use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::AppError;

/// Issuer claim of every access token minted here.
///
/// Tokens with any other `iss` (e.g. minted for another purpose with the same secret) are
/// rejected by `verify`.
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy-access";

/// Upper bound on access token lifetime, whatever the caller asks for.
pub const MAX_ACCESS_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

// Errors returned by access-token issuance and verification.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("failed to sign access token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("access token verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("invalid 'sub' (expected UUID)")]
    InvalidSubUuid,
}

impl From<AccessJwtError> for AppError {
    fn from(e: AccessJwtError) -> Self {
        match e {
            AccessJwtError::Sign(_) => {
                error!(error = %e, "access token issuance failed");
                AppError::Internal
            }
            // The client only ever sees a bare 401; the reason stays in the logs.
            AccessJwtError::Jwt(_) | AccessJwtError::InvalidSubUuid => {
                warn!(error = %e, "access token rejected");
                AppError::Unauthorized
            }
        }
    }
}

/// Access token (JWT) claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 access-token codec keyed by the server secret.
///
/// Debug output never includes key material.
#[derive(Clone)]
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AccessTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AccessTokenCodec")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessTokenCodec {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        // Only HS256 is accepted; `alg: none` or any other algorithm fails decoding.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Lifetime actually granted for a requested one.
    ///
    /// `None` or zero means the maximum; anything longer is clamped to it.
    pub fn effective_ttl(requested: Option<Duration>) -> Duration {
        match requested {
            Some(ttl) if !ttl.is_zero() => ttl.min(MAX_ACCESS_TOKEN_TTL),
            _ => MAX_ACCESS_TOKEN_TTL,
        }
    }

    /// Issue an access token for `user_id`.
    pub fn issue(
        &self,
        user_id: Uuid,
        requested: Option<Duration>,
    ) -> Result<String, AccessJwtError> {
        let ttl = Self::effective_ttl(requested);
        let now = chrono::Utc::now().timestamp();

        let claims = AccessTokenClaims {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AccessJwtError::Sign)
    }

    /// Verify signature, `exp` and `iss`, returning the raw claims.
    pub fn verify_claims(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify the token and return the user id it was issued for.
    ///
    /// This is the entry-point for the authorization middleware.
    pub fn verify(&self, token: &str) -> Result<Uuid, AccessJwtError> {
        let claims = self.verify_claims(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| AccessJwtError::InvalidSubUuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-jwt-secret";

    fn codec() -> AccessTokenCodec {
        AccessTokenCodec::new(SECRET, 0)
    }

    fn sign_raw(claims: &AccessTokenClaims, alg: Algorithm, secret: &[u8]) -> String {
        jsonwebtoken::encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    fn claims_for(sub: &str, iss: &str, exp_offset: i64) -> AccessTokenClaims {
        let now = chrono::Utc::now().timestamp();
        AccessTokenClaims {
            iss: iss.to_string(),
            sub: sub.to_string(),
            iat: now,
            exp: now + exp_offset,
        }
    }

    #[test]
    fn issued_token_verifies_to_same_user() {
        let user_id = Uuid::new_v4();
        let token = codec()
            .issue(user_id, Some(Duration::from_secs(120)))
            .unwrap();

        assert_eq!(codec().verify(&token).unwrap(), user_id);
    }

    #[test]
    fn requested_lifetime_is_clamped_to_one_hour() {
        let user_id = Uuid::new_v4();
        let token = codec()
            .issue(user_id, Some(Duration::from_secs(60 * 60 * 24 * 30)))
            .unwrap();

        let claims = codec().verify_claims(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.iss, ACCESS_TOKEN_ISSUER);
        assert_eq!(codec().verify(&token).unwrap(), user_id);
    }

    #[test]
    fn missing_or_zero_lifetime_defaults_to_one_hour() {
        assert_eq!(AccessTokenCodec::effective_ttl(None), MAX_ACCESS_TOKEN_TTL);
        assert_eq!(
            AccessTokenCodec::effective_ttl(Some(Duration::ZERO)),
            MAX_ACCESS_TOKEN_TTL
        );
        assert_eq!(
            AccessTokenCodec::effective_ttl(Some(Duration::from_secs(30))),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = AccessTokenCodec::new(b"another-secret", 0)
            .issue(Uuid::new_v4(), None)
            .unwrap();

        assert!(matches!(codec().verify(&token), Err(AccessJwtError::Jwt(_))));
    }

    #[test]
    fn rejects_tampered_issuer() {
        let claims = claims_for(&Uuid::new_v4().to_string(), "chirpy-refresh", 600);
        let token = sign_raw(&claims, Algorithm::HS256, SECRET);

        assert!(codec().verify(&token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let claims = claims_for(&Uuid::new_v4().to_string(), ACCESS_TOKEN_ISSUER, -7200);
        let token = sign_raw(&claims, Algorithm::HS256, SECRET);

        assert!(codec().verify(&token).is_err());
    }

    #[test]
    fn rejects_other_algorithm_even_with_same_secret() {
        let claims = claims_for(&Uuid::new_v4().to_string(), ACCESS_TOKEN_ISSUER, 600);
        let token = sign_raw(&claims, Algorithm::HS512, SECRET);

        assert!(codec().verify(&token).is_err());
    }

    #[test]
    fn rejects_non_uuid_subject() {
        let claims = claims_for("not-a-uuid", ACCESS_TOKEN_ISSUER, 600);
        let token = sign_raw(&claims, Algorithm::HS256, SECRET);

        assert!(matches!(
            codec().verify(&token),
            Err(AccessJwtError::InvalidSubUuid)
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(codec().verify("abc123").is_err());
        assert!(codec().verify("").is_err());
    }

    #[test]
    fn verification_failures_map_to_unauthorized() {
        let err = codec().verify("abc123").unwrap_err();
        assert!(matches!(AppError::from(err), AppError::Unauthorized));
    }
}
