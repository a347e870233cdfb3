/*
 * Responsibility
 * - GET /admin/metrics: HTML page with the /app hit count
 * - POST /admin/reset: zero the counter and delete every user (development only)
 */
use std::sync::atomic::Ordering;

use axum::{extract::State, http::StatusCode, response::Html};
use tracing::{info, warn};

use crate::{error::AppError, state::AppState};

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.file_server_hits.load(Ordering::Relaxed);

    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    \
         <p>Chirpy has been visited {hits} times!</p>\n  </body>\n</html>"
    ))
}

pub async fn reset(State(state): State<AppState>) -> Result<(StatusCode, &'static str), AppError> {
    if state.app_env.is_production() {
        warn!("reset attempted in production");
        return Err(AppError::Forbidden);
    }

    state.file_server_hits.store(0, Ordering::Relaxed);
    let deleted = state.users.delete_all().await?;

    info!(deleted, "hits reset and users deleted");
    Ok((StatusCode::OK, "Hits reset to 0 and users deleted"))
}
