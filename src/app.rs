/*
 * Responsibility
 * - tracing + panic hook
 * - Config -> PgPool (+ migrations) -> repos/services -> AppState
 * - Router assembly: api/admin/app routes, then HTTP-level middleware, then CORS
 * - axum::serve()
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::repos::{
    chirp_repo::PgChirpRepo, refresh_token_repo::PgRefreshTokenRepo, user_repo::PgUserRepo,
};
use crate::services::auth::{
    AccessTokenCodec, TokenService, password::PasswordHasher, refresh_token::RefreshTokenService,
};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g. RUST_LOG=info,chirpy=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr may not be collected; tracing is.
        tracing::error!(?info, "panic");

        // Development: crash loudly. Production: default hook, the server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(config = ?config, "starting chirpy");

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("failed to connect to Postgres")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let users = Arc::new(PgUserRepo::new(pool.clone()));
    let refresh_tokens = Arc::new(PgRefreshTokenRepo::new(pool.clone()));
    let chirps = Arc::new(PgChirpRepo::new(pool));

    let auth = TokenService::new(
        users.clone(),
        PasswordHasher::new(config.password_hash_cost),
        AccessTokenCodec::new(
            config.jwt_secret.as_bytes(),
            config.access_token_leeway_seconds,
        ),
        RefreshTokenService::new(refresh_tokens),
    );

    Ok(AppState::new(
        Arc::new(auth),
        users,
        chirps,
        config.polka_key.as_str(),
        config.app_env,
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::v1::routes(state, &config.fileserver_root);
    let router = middleware::http::apply(router);
    middleware::cors::apply(router, config)
}
