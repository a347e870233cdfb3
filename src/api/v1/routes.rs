/*
 * Responsibility
 * - URL layout: /api (JSON API), /admin (metrics + reset), /app (static files, hit-counted)
 * - Which routes sit behind the access middleware (route_layer, so unknown paths stay 404)
 *
 * The same path may have a public and a protected method (GET vs DELETE /chirps/{id});
 * the two routers are merged, and axum merges method routers per path.
 */
use std::path::Path;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::api::v1::handlers::{
    admin::{metrics, reset},
    auth::{login, refresh, revoke},
    chirps::{create_chirp, delete_chirp, get_chirp, list_chirps},
    health::healthz,
    users::{create_user, update_user},
    webhooks::polka_webhook,
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState, static_root: &Path) -> Router {
    let public = Router::new()
        .route("/healthz", get(healthz))
        .route("/users", post(create_user))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/revoke", post(revoke))
        .route("/chirps", get(list_chirps))
        .route("/chirps/{chirp_id}", get(get_chirp))
        .route("/polka/webhooks", post(polka_webhook));

    let protected = Router::new()
        .route("/users", put(update_user))
        .route("/chirps", post(create_chirp))
        .route("/chirps/{chirp_id}", delete(delete_chirp));
    let protected = middleware::auth::access::apply(protected, state.clone());

    let admin = Router::new()
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset));

    let app_files = Router::new().nest_service("/app", ServeDir::new(static_root));
    let app_files = middleware::metrics::apply(app_files, state.clone());

    Router::new()
        .nest("/api", public.merge(protected))
        .merge(admin)
        .merge(app_files)
        .with_state(state)
}
