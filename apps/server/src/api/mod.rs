//! Router assembly: per-module routers merged under shared state, with CORS
//! and request tracing layered on top.

pub mod assets;
pub mod auth;
pub mod health;
pub mod portfolios;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring unparseable CORS origin '{origin}'");
                None
            }
        })
        .collect();

    // Cookies ride along, so origins must be explicit; a wildcard would make
    // the browser drop credentialed requests.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(auth::router())
        .merge(portfolios::router())
        .merge(assets::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
