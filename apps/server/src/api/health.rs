use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use folio_core::health::Health;

use crate::main_lib::AppState;

/// Combined diagnostics for both backends. Degraded configuration or an
/// unreachable store answers 500 with the same body, so probes and humans
/// see identical detail.
async fn get_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Health>) {
    let auth_health = state.auth_service.health_check().await;
    let storage_health = state.portfolio_service.health_check();

    let health = auth_health.merge(storage_health);
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(health))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}
