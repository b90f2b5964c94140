use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::portfolio_model::{Asset, NewAsset, NewPortfolio, Portfolio, PortfolioUpdate};
use super::valuation::PortfolioValuation;
use crate::errors::Result;
use crate::health::Health;
use crate::utils::pagination::{PaginationRequest, PaginationResponse};

/// Trait defining the contract for portfolio service operations.
///
/// Everything here except `portfolio_valuation` is a one-line forward to the
/// repository; the service adds the valuation cache on top.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn health_check(&self) -> Health;

    /// The injected reference price table.
    fn prices(&self) -> HashMap<String, f64>;

    async fn create_portfolio(&self, owner_id: Uuid, new_portfolio: NewPortfolio)
        -> Result<Portfolio>;
    fn get_portfolio(&self, owner_id: Uuid, portfolio_id: i64) -> Result<Option<Portfolio>>;
    async fn update_portfolio(
        &self,
        owner_id: Uuid,
        portfolio_id: i64,
        update: PortfolioUpdate,
    ) -> Result<Option<Portfolio>>;
    async fn delete_portfolio(&self, owner_id: Uuid, portfolio_id: i64) -> Result<bool>;
    fn list_portfolios(
        &self,
        owner_id: Uuid,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Portfolio>, PaginationResponse)>;

    async fn create_asset(&self, portfolio_id: i64, new_asset: NewAsset) -> Result<Asset>;
    async fn delete_asset(&self, asset_id: i64) -> Result<bool>;
    fn list_assets_paginated(
        &self,
        portfolio_id: i64,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Asset>, PaginationResponse)>;

    /// Prices the portfolio's assets, serving from the cache within the TTL.
    fn portfolio_valuation(&self, portfolio_id: i64) -> Result<Arc<PortfolioValuation>>;
}

/// Trait defining the contract for portfolio storage operations.
///
/// Every owner-scoped operation must treat an owner mismatch exactly like a
/// missing row; callers can never learn whether a foreign portfolio exists.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    async fn create_portfolio(&self, owner_id: Uuid, new_portfolio: NewPortfolio)
        -> Result<Portfolio>;
    fn get_portfolio(&self, owner_id: Uuid, portfolio_id: i64) -> Result<Option<Portfolio>>;
    async fn update_portfolio(
        &self,
        owner_id: Uuid,
        portfolio_id: i64,
        update: PortfolioUpdate,
    ) -> Result<Option<Portfolio>>;
    async fn delete_portfolio(&self, owner_id: Uuid, portfolio_id: i64) -> Result<bool>;
    fn list_portfolios(
        &self,
        owner_id: Uuid,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Portfolio>, PaginationResponse)>;

    async fn create_asset(&self, portfolio_id: i64, new_asset: NewAsset) -> Result<Asset>;
    async fn delete_asset(&self, asset_id: i64) -> Result<bool>;
    fn list_assets_paginated(
        &self,
        portfolio_id: i64,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Asset>, PaginationResponse)>;

    /// All assets of a portfolio in stable id order, no pagination.
    /// Used only by the valuation engine.
    fn list_assets(&self, portfolio_id: i64) -> Result<Vec<Asset>>;

    /// Cheap reachability probe for health checks.
    fn ping(&self) -> Result<()>;
}
