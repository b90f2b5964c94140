//! Tests for the PortfolioService valuation path.
//!
//! The CRUD methods are plain forwards and are covered by the storage and
//! API tests; what matters here is the cache contract: a hit returns the
//! same allocation without touching storage, and expiry forces exactly one
//! recomputation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::{DatabaseError, Result};
use crate::portfolio::{
    Asset, NewAsset, NewPortfolio, Portfolio, PortfolioRepositoryTrait, PortfolioService,
    PortfolioServiceTrait, PortfolioUpdate,
};
use crate::utils::pagination::{PaginationRequest, PaginationResponse};

/// Repository stub serving a fixed asset list and counting valuation reads.
struct FixedAssets {
    assets: Vec<Asset>,
    list_calls: AtomicUsize,
}

impl FixedAssets {
    fn new(assets: Vec<Asset>) -> Self {
        Self {
            assets,
            list_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for FixedAssets {
    async fn create_portfolio(&self, _owner_id: Uuid, _new: NewPortfolio) -> Result<Portfolio> {
        Err(DatabaseError::Internal("not used in this test".to_string()).into())
    }

    fn get_portfolio(&self, _owner_id: Uuid, _portfolio_id: i64) -> Result<Option<Portfolio>> {
        Ok(None)
    }

    async fn update_portfolio(
        &self,
        _owner_id: Uuid,
        _portfolio_id: i64,
        _update: PortfolioUpdate,
    ) -> Result<Option<Portfolio>> {
        Ok(None)
    }

    async fn delete_portfolio(&self, _owner_id: Uuid, _portfolio_id: i64) -> Result<bool> {
        Ok(false)
    }

    fn list_portfolios(
        &self,
        _owner_id: Uuid,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Portfolio>, PaginationResponse)> {
        Ok((Vec::new(), PaginationResponse::for_request(0, pagination)))
    }

    async fn create_asset(&self, _portfolio_id: i64, _new: NewAsset) -> Result<Asset> {
        Err(DatabaseError::Internal("not used in this test".to_string()).into())
    }

    async fn delete_asset(&self, _asset_id: i64) -> Result<bool> {
        Ok(false)
    }

    fn list_assets_paginated(
        &self,
        _portfolio_id: i64,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Asset>, PaginationResponse)> {
        Ok((Vec::new(), PaginationResponse::for_request(0, pagination)))
    }

    fn list_assets(&self, _portfolio_id: i64) -> Result<Vec<Asset>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.assets.clone())
    }

    fn ping(&self) -> Result<()> {
        Ok(())
    }
}

fn asset(id: i64, symbol: &str, quantity: f64) -> Asset {
    Asset {
        id,
        portfolio_id: 1,
        symbol: symbol.to_string(),
        quantity,
        created_at: Utc::now(),
    }
}

fn service_with(
    assets: Vec<Asset>,
    ttl: Duration,
) -> (Arc<FixedAssets>, PortfolioService) {
    let repository = Arc::new(FixedAssets::new(assets));
    let service = PortfolioService::with_config(
        repository.clone(),
        crate::constants::reference_prices(),
        ttl,
        100,
    );
    (repository, service)
}

#[test]
fn valuation_is_served_from_cache_within_the_ttl() {
    let (repository, service) = service_with(
        vec![asset(1, "BTC", 0.01), asset(2, "ETH", 2.0)],
        Duration::from_secs(30),
    );

    let first = service.portfolio_valuation(1).unwrap();
    let second = service.portfolio_valuation(1).unwrap();

    // Same allocation, not merely equal fields.
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(repository.list_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn expired_valuation_requeries_storage_exactly_once() {
    let (repository, service) = service_with(
        vec![asset(1, "BTC", 1.0)],
        Duration::from_millis(20),
    );

    service.portfolio_valuation(1).unwrap();
    std::thread::sleep(Duration::from_millis(40));
    service.portfolio_valuation(1).unwrap();

    assert_eq!(repository.list_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn distinct_portfolios_have_distinct_cache_entries() {
    let (repository, service) = service_with(vec![asset(1, "BTC", 1.0)], Duration::from_secs(30));

    service.portfolio_valuation(1).unwrap();
    service.portfolio_valuation(2).unwrap();
    service.portfolio_valuation(1).unwrap();
    service.portfolio_valuation(2).unwrap();

    assert_eq!(repository.list_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn valuation_total_matches_the_reference_prices() {
    let (_, service) = service_with(
        vec![asset(1, "BTC", 0.01), asset(2, "ETH", 2.0)],
        Duration::from_secs(30),
    );

    let valuation = service.portfolio_valuation(1).unwrap();
    assert_eq!(valuation.total_value, 0.01 * 93556.62 + 2.0 * 3191.30);
    assert_eq!(valuation.lines.len(), 2);
    assert_eq!(valuation.lines[0].symbol, "BTC");
    assert_eq!(valuation.lines[1].symbol, "ETH");
}

#[test]
fn unpriced_symbols_are_reported_normalized() {
    let (_, service) = service_with(
        vec![asset(1, " btc ", 1.0), asset(2, "xyz", 3.0)],
        Duration::from_secs(30),
    );

    let valuation = service.portfolio_valuation(1).unwrap();
    // " btc " prices as BTC; "xyz" surfaces uppercased.
    assert_eq!(valuation.lines.len(), 1);
    assert_eq!(valuation.lines[0].symbol, " btc ");
    assert_eq!(valuation.unknown_symbols, vec!["XYZ"]);
}

#[tokio::test]
async fn create_asset_rejects_invalid_input_before_storage() {
    let (repository, service) = service_with(Vec::new(), Duration::from_secs(30));

    let result = service
        .create_asset(
            1,
            NewAsset {
                symbol: String::new(),
                quantity: 1.0,
            },
        )
        .await;

    assert!(result.is_err());
    assert_eq!(repository.list_calls.load(Ordering::SeqCst), 0);
}
