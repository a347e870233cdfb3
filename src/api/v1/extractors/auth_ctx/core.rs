use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthCtx;

/// Handler で AuthCtx を受け取るための extractor
/// access middleware が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は AppError::Unauthorized (401, 共通の error body)
/// - route が middleware の外に置かれている設定ミスもここで 401 になる
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, Request, header};
    use uuid::Uuid;

    use super::*;
    use crate::services::auth::AccessTokenCodec;

    #[tokio::test]
    async fn missing_ctx_is_unauthorized() {
        let (mut parts, _) = Request::new(()).into_parts();

        let res = AuthCtxExtractor::from_request_parts(&mut parts, &()).await;
        assert!(matches!(res, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn ctx_inserted_by_gate_is_handed_over() {
        let codec = AccessTokenCodec::new(b"test-jwt-secret", 0);
        let user_id = Uuid::new_v4();
        let token = codec.issue(user_id, None).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        let ctx = AuthCtx::authenticate(&headers, &codec).unwrap();

        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(ctx);

        let AuthCtxExtractor(got) = AuthCtxExtractor::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(got.user_id(), user_id);
    }
}
