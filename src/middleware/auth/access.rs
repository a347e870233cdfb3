//! Access token (JWT) verification → put AuthCtx into request extensions.
//!
//! Per request: UNVERIFIED → VERIFIED, one way, no retry.
//! - `Authorization: Bearer <jwt>` must be present
//! - the JWT must pass signature / exp / iss checks (AccessTokenCodec)
//! - any failure ends the request with 401; the wrapped handler never runs
//!
//! This middleware is the only writer of AuthCtx. Handlers read it through `AuthCtxExtractor`.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Put the given routes behind access-token authentication.
///
/// Example:
/// ```ignore
/// let protected = Router::new().route("/chirps", post(create_chirp));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // `route_layer` so unmatched paths still 404 instead of 401.
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Never trust an AuthCtx that did not come from this verification.
    req.extensions_mut().remove::<AuthCtx>();

    let auth_ctx = match AuthCtx::authenticate(req.headers(), state.auth.codec()) {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                "access token verification failed"
            );
            return Err(err);
        }
    };

    tracing::debug!(user_id = %auth_ctx.user_id(), "request authenticated");

    // middleware → extractor
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
