use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use super::portfolio_model::{Asset, NewAsset, NewPortfolio, Portfolio, PortfolioUpdate};
use super::portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use super::valuation::PortfolioValuation;
use crate::constants::{VALUATION_CACHE_CAPACITY, VALUATION_CACHE_TTL};
use crate::errors::{Error, Result};
use crate::health::Health;
use crate::utils::pagination::{PaginationRequest, PaginationResponse};
use crate::utils::ttl_cache::TtlCache;

/// Service for managing portfolios and their assets.
///
/// CRUD operations forward to the repository; the valuation path adds a
/// bounded per-portfolio cache. The cache is keyed by portfolio id alone and
/// is not invalidated on asset mutation, so a valuation may be stale for up
/// to the TTL. That window is part of the contract, not a bug.
pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    prices: HashMap<String, f64>,
    valuation_cache: Mutex<TtlCache<i64, Arc<PortfolioValuation>>>,
}

impl PortfolioService {
    /// Creates a service with the default reference prices and cache bounds.
    pub fn new(repository: Arc<dyn PortfolioRepositoryTrait>) -> Self {
        Self::with_config(
            repository,
            crate::constants::reference_prices(),
            VALUATION_CACHE_TTL,
            VALUATION_CACHE_CAPACITY,
        )
    }

    /// Creates a service with an explicit price table and cache bounds.
    pub fn with_config(
        repository: Arc<dyn PortfolioRepositoryTrait>,
        prices: HashMap<String, f64>,
        cache_ttl: Duration,
        cache_capacity: usize,
    ) -> Self {
        Self {
            repository,
            prices,
            valuation_cache: Mutex::new(TtlCache::new(cache_ttl, cache_capacity)),
        }
    }

    fn cache_get(&self, portfolio_id: i64) -> Result<Option<Arc<PortfolioValuation>>> {
        let mut cache = self
            .valuation_cache
            .lock()
            .map_err(|e| Error::Unexpected(format!("valuation cache lock poisoned: {e}")))?;
        Ok(cache.get(&portfolio_id))
    }

    fn cache_put(&self, portfolio_id: i64, valuation: Arc<PortfolioValuation>) -> Result<()> {
        let mut cache = self
            .valuation_cache
            .lock()
            .map_err(|e| Error::Unexpected(format!("valuation cache lock poisoned: {e}")))?;
        cache.insert(portfolio_id, valuation);
        Ok(())
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn health_check(&self) -> Health {
        match self.repository.ping() {
            Ok(()) => Health::ok(),
            Err(e) => {
                log::error!("storage health probe failed: {e}");
                Health::error("could not connect to database")
            }
        }
    }

    fn prices(&self) -> HashMap<String, f64> {
        self.prices.clone()
    }

    async fn create_portfolio(
        &self,
        owner_id: Uuid,
        new_portfolio: NewPortfolio,
    ) -> Result<Portfolio> {
        new_portfolio.validate()?;
        self.repository.create_portfolio(owner_id, new_portfolio).await
    }

    fn get_portfolio(&self, owner_id: Uuid, portfolio_id: i64) -> Result<Option<Portfolio>> {
        self.repository.get_portfolio(owner_id, portfolio_id)
    }

    async fn update_portfolio(
        &self,
        owner_id: Uuid,
        portfolio_id: i64,
        update: PortfolioUpdate,
    ) -> Result<Option<Portfolio>> {
        update.validate()?;
        self.repository
            .update_portfolio(owner_id, portfolio_id, update)
            .await
    }

    async fn delete_portfolio(&self, owner_id: Uuid, portfolio_id: i64) -> Result<bool> {
        self.repository.delete_portfolio(owner_id, portfolio_id).await
    }

    fn list_portfolios(
        &self,
        owner_id: Uuid,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Portfolio>, PaginationResponse)> {
        self.repository.list_portfolios(owner_id, pagination)
    }

    async fn create_asset(&self, portfolio_id: i64, new_asset: NewAsset) -> Result<Asset> {
        new_asset.validate()?;
        self.repository.create_asset(portfolio_id, new_asset).await
    }

    async fn delete_asset(&self, asset_id: i64) -> Result<bool> {
        self.repository.delete_asset(asset_id).await
    }

    fn list_assets_paginated(
        &self,
        portfolio_id: i64,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Asset>, PaginationResponse)> {
        self.repository.list_assets_paginated(portfolio_id, pagination)
    }

    fn portfolio_valuation(&self, portfolio_id: i64) -> Result<Arc<PortfolioValuation>> {
        if let Some(cached) = self.cache_get(portfolio_id)? {
            debug!("valuation cache hit for portfolio {portfolio_id}");
            return Ok(cached);
        }

        let assets = self.repository.list_assets(portfolio_id)?;
        let valuation = Arc::new(PortfolioValuation::compute(
            portfolio_id,
            &assets,
            &self.prices,
        ));
        self.cache_put(portfolio_id, valuation.clone())?;
        Ok(valuation)
    }
}
