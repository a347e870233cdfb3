//! Hit counter for the static file server (`/app`).
//!
//! Every request routed under `/app` counts, found or not. `/admin/metrics` reads the counter
//! and `/admin/reset` zeroes it.

use std::sync::atomic::Ordering;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, count_hit))
}

async fn count_hit(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    state.file_server_hits.fetch_add(1, Ordering::Relaxed);
    next.run(req).await
}
