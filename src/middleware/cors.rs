//! CORS policy for browser clients.
//!
//! Policy:
//! - Development: any origin, WITHOUT credentials.
//! - Production: only origins listed in CORS_ALLOWED_ORIGINS, WITHOUT credentials.
//!   An empty list allows none.
//!
//! Tokens travel in the Authorization header, never in cookies, so credentials stay off.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::middleware::http::REQUEST_ID_HEADER;

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config.app_env.is_production(), &config.cors_allowed_origins))
}

fn layer(production: bool, allowed_origins: &[String]) -> CorsLayer {
    let cors = if production {
        let allowed: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    cors.allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static(REQUEST_ID_HEADER),
    ])
    .max_age(Duration::from_secs(60 * 10))
}
