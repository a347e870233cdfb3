//! Credential material carried in the `Authorization` header.
//!
//! Two schemes share the header:
//! - `Bearer <token>`: user sessions (access tokens, or refresh tokens on /refresh and /revoke)
//! - `ApiKey <key>`: service-to-service callers such as the payment provider webhook
//!
//! Callers pick the scheme that matches the endpoint's trust model.

use axum::http::{HeaderMap, header};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

use crate::error::AppError;

pub const BEARER_SCHEME: &str = "Bearer";
pub const API_KEY_SCHEME: &str = "ApiKey";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    // Absent, non-UTF-8, wrong scheme, or no value after the scheme.
    #[error("missing or malformed {0} credential")]
    Missing(&'static str),
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        debug!(error = %e, "credential extraction failed");
        AppError::Unauthorized
    }
}

/// Token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, CredentialError> {
    scheme_value(headers, BEARER_SCHEME)
}

/// Key from `Authorization: ApiKey <key>`.
pub fn api_key(headers: &HeaderMap) -> Result<&str, CredentialError> {
    scheme_value(headers, API_KEY_SCHEME)
}

/// Accept the request only if it carries exactly the configured API key.
pub fn require_api_key(headers: &HeaderMap, configured: &str) -> Result<(), AppError> {
    let presented = api_key(headers)?;

    if !constant_time_eq(presented.as_bytes(), configured.as_bytes()) {
        debug!("api key mismatch");
        return Err(AppError::Unauthorized);
    }

    Ok(())
}

fn scheme_value<'a>(
    headers: &'a HeaderMap,
    scheme: &'static str,
) -> Result<&'a str, CredentialError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(CredentialError::Missing(scheme))?;

    let mut parts = raw.split(' ');
    match (parts.next(), parts.next()) {
        (Some(name), Some(value)) if name == scheme && !value.is_empty() => Ok(value),
        _ => Err(CredentialError::Missing(scheme)),
    }
}

// Length is not secret; the content comparison does not short-circuit.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(bearer_token(&headers_with("Bearer abc123")), Ok("abc123"));
    }

    #[test]
    fn bearer_without_token_is_missing() {
        let err = Err(CredentialError::Missing(BEARER_SCHEME));
        assert_eq!(bearer_token(&headers_with("Bearer")), err);
        assert_eq!(bearer_token(&headers_with("")), err);
        assert_eq!(bearer_token(&headers_with("Bearer ")), err);
        assert_eq!(bearer_token(&HeaderMap::new()), err);
    }

    #[test]
    fn other_scheme_is_not_a_bearer_token() {
        assert!(bearer_token(&headers_with("ApiKey abc123")).is_err());
        assert!(bearer_token(&headers_with("bearer abc123")).is_err());
        assert!(bearer_token(&headers_with("Basic dXNlcjpwdw==")).is_err());
    }

    #[test]
    fn api_key_is_extracted() {
        assert_eq!(
            api_key(&headers_with("ApiKey f271c81ff7084ee5")),
            Ok("f271c81ff7084ee5")
        );
        assert!(api_key(&headers_with("Bearer f271c81ff7084ee5")).is_err());
        assert!(api_key(&headers_with("ApiKey")).is_err());
    }

    #[test]
    fn require_api_key_matches_configured_key() {
        assert!(require_api_key(&headers_with("ApiKey secret-key"), "secret-key").is_ok());
        assert!(matches!(
            require_api_key(&headers_with("ApiKey other-key"), "secret-key"),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            require_api_key(&HeaderMap::new(), "secret-key"),
            Err(AppError::Unauthorized)
        ));
    }
}
