use std::sync::Arc;

use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use folio_core::auth::User;

use crate::config::CookieSettings;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{CredentialsRequest, MeResponse, SessionResponse, UserResponse};

/// The authenticated caller, resolved from a bearer header or the auth
/// cookie. Handlers take this as an extractor argument; requests without a
/// valid identity are rejected with 401 before the handler runs.
pub struct CurrentUser(pub User);

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|part| {
        part.trim()
            .strip_prefix(CookieSettings::COOKIE_NAME)?
            .strip_prefix('=')
            .map(str::to_string)
    })
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .or_else(|| cookie_token(&parts.headers))
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        let user = state
            .auth_service
            .user_from_token(&token)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid token"))?;
        Ok(CurrentUser(user))
    }
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<SessionResponse>)> {
    payload.validate()?;
    let (user, token) = state
        .auth_service
        .register(&payload.email, &payload.password)
        .await?;

    let cookie = state.cookie.auth_cookie(&token);
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse {
            user: UserResponse::from(user),
            access_token: token,
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsRequest>,
) -> ApiResult<([(header::HeaderName, String); 1], Json<SessionResponse>)> {
    payload.validate()?;
    let (user, token) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    let cookie = state.cookie.auth_cookie(&token);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse {
            user: UserResponse::from(user),
            access_token: token,
        }),
    ))
}

async fn logout(
    State(state): State<Arc<AppState>>,
) -> ([(header::HeaderName, String); 1], Json<serde_json::Value>) {
    (
        [(header::SET_COOKIE, state.cookie.clear_cookie())],
        Json(json!({ "status": "ok" })),
    )
}

async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserResponse::from(user),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}
