/*
 * Responsibility
 * - Load settings from the environment (DATABASE_URL, secrets, CORS, hashing cost, static root)
 * - Validate them up front (missing or invalid -> startup fails)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::services::auth::password::{DEFAULT_HASH_COST, MAX_HASH_COST, MIN_HASH_COST};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: String,
    pub db_max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
    // Directory served under /app
    pub fileserver_root: PathBuf,

    // HS256 secret for access tokens
    pub jwt_secret: String,
    // Shared key presented by the payment provider (Authorization: ApiKey <key>)
    pub polka_key: String,

    pub password_hash_cost: u32,
    pub access_token_leeway_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets and the database URL (may embed a password) stay out of logs.
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("db_max_connections", &self.db_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("fileserver_root", &self.fileserver_root)
            .field("password_hash_cost", &self.password_hash_cost)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let fileserver_root = lookup("FILESERVER_ROOT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let jwt_secret = required_non_empty(&lookup, "JWT_SECRET")?;
        let polka_key = required_non_empty(&lookup, "POLKA_KEY")?;

        let password_hash_cost = match lookup("PASSWORD_HASH_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|c| (MIN_HASH_COST..=MAX_HASH_COST).contains(c))
                .ok_or(ConfigError::Invalid("PASSWORD_HASH_COST"))?,
            None => DEFAULT_HASH_COST,
        };

        let access_token_leeway_seconds = lookup("ACCESS_TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        Ok(Self {
            addr,
            app_env,
            database_url,
            db_max_connections,
            cors_allowed_origins,
            fileserver_root,
            jwt_secret,
            polka_key,
            password_hash_cost,
            access_token_leeway_seconds,
        })
    }
}

fn required_non_empty<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or(ConfigError::Missing(key))?;
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(key));
    }
    Ok(value)
}
