/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - auth: TokenService, repos behind traits, the webhook API key
 *   - app_env (admin reset is development-only) and the /app hit counter
 * - Cheap to Clone (everything inside is Arc or Copy)
 */
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::config::AppEnv;
use crate::repos::{chirp_repo::ChirpRepo, user_repo::UserRepo};
use crate::services::auth::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<TokenService>,
    pub users: Arc<dyn UserRepo>,
    pub chirps: Arc<dyn ChirpRepo>,
    pub polka_key: Arc<str>,
    pub app_env: AppEnv,
    pub file_server_hits: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(
        auth: Arc<TokenService>,
        users: Arc<dyn UserRepo>,
        chirps: Arc<dyn ChirpRepo>,
        polka_key: impl Into<Arc<str>>,
        app_env: AppEnv,
    ) -> Self {
        Self {
            auth,
            users,
            chirps,
            polka_key: polka_key.into(),
            app_env,
            file_server_hits: Arc::new(AtomicU64::new(0)),
        }
    }
}
