use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use folio_core::portfolio::{NewPortfolio, PortfolioUpdate};

use super::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{
    ListResponse, PaginationQuery, PortfolioCreateRequest, PortfolioPatchRequest,
    PortfolioResponse, PortfolioValuationResponse,
};

async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<PortfolioCreateRequest>,
) -> ApiResult<(StatusCode, Json<PortfolioResponse>)> {
    payload.validate()?;
    let portfolio = state
        .portfolio_service
        .create_portfolio(user.id, NewPortfolio { name: payload.name })
        .await?;
    Ok((StatusCode::CREATED, Json(portfolio.into())))
}

async fn list_portfolios(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<Json<ListResponse<PortfolioResponse>>> {
    let pagination = query.validate()?;
    let (items, pagination_response) = state
        .portfolio_service
        .list_portfolios(user.id, &pagination)?;

    Ok(Json(ListResponse {
        items: items.into_iter().map(PortfolioResponse::from).collect(),
        pagination_response,
    }))
}

async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(portfolio_id): Path<i64>,
) -> ApiResult<Json<PortfolioResponse>> {
    let portfolio = state
        .portfolio_service
        .get_portfolio(user.id, portfolio_id)?
        .ok_or_else(|| ApiError::not_found("Portfolio not found"))?;
    Ok(Json(portfolio.into()))
}

async fn update_portfolio(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(portfolio_id): Path<i64>,
    Json(payload): Json<PortfolioPatchRequest>,
) -> ApiResult<Json<PortfolioResponse>> {
    payload.validate()?;
    let portfolio = state
        .portfolio_service
        .update_portfolio(user.id, portfolio_id, PortfolioUpdate { name: payload.name })
        .await?
        .ok_or_else(|| ApiError::not_found("Portfolio not found"))?;
    Ok(Json(portfolio.into()))
}

async fn delete_portfolio(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(portfolio_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .portfolio_service
        .delete_portfolio(user.id, portfolio_id)
        .await?;
    if !deleted {
        return Err(ApiError::not_found("Portfolio not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn get_portfolio_valuation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(portfolio_id): Path<i64>,
) -> ApiResult<Json<PortfolioValuationResponse>> {
    // Ownership check first; the valuation cache is keyed by portfolio id
    // alone and must never leak another owner's numbers.
    state
        .portfolio_service
        .get_portfolio(user.id, portfolio_id)?
        .ok_or_else(|| ApiError::not_found("Portfolio not found"))?;

    let valuation = state.portfolio_service.portfolio_valuation(portfolio_id)?;
    Ok(Json(PortfolioValuationResponse::from(valuation.as_ref())))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolios", post(create_portfolio).get(list_portfolios))
        .route(
            "/portfolios/{portfolio_id}",
            get(get_portfolio)
                .patch(update_portfolio)
                .delete(delete_portfolio),
        )
        .route(
            "/portfolios/{portfolio_id}/valuation",
            get(get_portfolio_valuation),
        )
}
