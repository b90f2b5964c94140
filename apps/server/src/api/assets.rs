use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use folio_core::portfolio::NewAsset;

use super::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{AssetCreateRequest, AssetResponse, ListResponse, PaginationQuery};

async fn get_prices(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
) -> Json<HashMap<String, f64>> {
    Json(state.portfolio_service.prices())
}

/// Resolves the portfolio under the caller's ownership, or 404.
/// Asset routes carry no owner column of their own; this is the gate.
fn require_owned_portfolio(
    state: &AppState,
    owner_id: uuid::Uuid,
    portfolio_id: i64,
) -> Result<(), ApiError> {
    state
        .portfolio_service
        .get_portfolio(owner_id, portfolio_id)?
        .ok_or_else(|| ApiError::not_found("Portfolio not found"))?;
    Ok(())
}

async fn add_asset(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(portfolio_id): Path<i64>,
    Json(payload): Json<AssetCreateRequest>,
) -> ApiResult<(StatusCode, Json<AssetResponse>)> {
    payload.validate()?;
    require_owned_portfolio(&state, user.id, portfolio_id)?;

    let asset = state
        .portfolio_service
        .create_asset(
            portfolio_id,
            NewAsset {
                symbol: payload.symbol,
                quantity: payload.quantity,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(asset.into())))
}

async fn list_assets(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(portfolio_id): Path<i64>,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<Json<ListResponse<AssetResponse>>> {
    let pagination = query.validate()?;
    require_owned_portfolio(&state, user.id, portfolio_id)?;

    let (items, pagination_response) = state
        .portfolio_service
        .list_assets_paginated(portfolio_id, &pagination)?;

    Ok(Json(ListResponse {
        items: items.into_iter().map(AssetResponse::from).collect(),
        pagination_response,
    }))
}

async fn delete_asset(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((portfolio_id, asset_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    require_owned_portfolio(&state, user.id, portfolio_id)?;

    let deleted = state.portfolio_service.delete_asset(asset_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Asset not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prices", get(get_prices))
        .route(
            "/portfolios/{portfolio_id}/assets",
            get(list_assets).post(add_asset),
        )
        .route(
            "/portfolios/{portfolio_id}/assets/{asset_id}",
            axum::routing::delete(delete_asset),
        )
}
