use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use folio_core::portfolio::{
    Asset, NewAsset, NewPortfolio, Portfolio, PortfolioRepositoryTrait, PortfolioUpdate,
};
use folio_core::utils::pagination::{PaginationRequest, PaginationResponse};
use folio_core::Result;

use super::model::{AssetDB, NewAssetDB, NewPortfolioDB, PortfolioDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{assets, portfolios};

/// Repository for managing portfolio and asset data in the database.
///
/// Every owner-scoped query filters on `(owner_id, id)` together, so a
/// lookup with the wrong owner is indistinguishable from a missing row.
pub struct PortfolioRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    async fn create_portfolio(
        &self,
        owner_id: Uuid,
        new_portfolio: NewPortfolio,
    ) -> Result<Portfolio> {
        let row = NewPortfolioDB {
            owner_id: owner_id.to_string(),
            name: new_portfolio.name,
            created_at: Utc::now().naive_utc(),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Portfolio> {
                let result_db = diesel::insert_into(portfolios::table)
                    .values(&row)
                    .returning(PortfolioDB::as_returning())
                    .get_result::<PortfolioDB>(conn)
                    .map_err(StorageError::from)?;
                result_db.try_into()
            })
            .await
    }

    fn get_portfolio(&self, owner_id: Uuid, portfolio_id: i64) -> Result<Option<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;

        let result = portfolios::table
            .filter(portfolios::owner_id.eq(owner_id.to_string()))
            .filter(portfolios::id.eq(portfolio_id))
            .select(PortfolioDB::as_select())
            .first::<PortfolioDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        result.map(Portfolio::try_from).transpose()
    }

    async fn update_portfolio(
        &self,
        owner_id: Uuid,
        portfolio_id: i64,
        update: PortfolioUpdate,
    ) -> Result<Option<Portfolio>> {
        let owner = owner_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Portfolio>> {
                let scope = portfolios::table
                    .filter(portfolios::owner_id.eq(&owner))
                    .filter(portfolios::id.eq(portfolio_id));

                let result_db = match update.name {
                    Some(name) => diesel::update(scope)
                        .set(portfolios::name.eq(name))
                        .returning(PortfolioDB::as_returning())
                        .get_result::<PortfolioDB>(conn)
                        .optional()
                        .map_err(StorageError::from)?,
                    // Nothing to change; still resolve the row so an owner
                    // mismatch reads as not-found.
                    None => scope
                        .select(PortfolioDB::as_select())
                        .first::<PortfolioDB>(conn)
                        .optional()
                        .map_err(StorageError::from)?,
                };

                result_db.map(Portfolio::try_from).transpose()
            })
            .await
    }

    async fn delete_portfolio(&self, owner_id: Uuid, portfolio_id: i64) -> Result<bool> {
        let owner = owner_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let deleted = diesel::delete(
                    portfolios::table
                        .filter(portfolios::owner_id.eq(&owner))
                        .filter(portfolios::id.eq(portfolio_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(deleted > 0)
            })
            .await
    }

    fn list_portfolios(
        &self,
        owner_id: Uuid,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Portfolio>, PaginationResponse)> {
        let mut conn = get_connection(&self.pool)?;
        let owner = owner_id.to_string();

        let total_items: i64 = portfolios::table
            .filter(portfolios::owner_id.eq(&owner))
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?;

        let rows = portfolios::table
            .filter(portfolios::owner_id.eq(&owner))
            .order(portfolios::id.desc())
            .limit(pagination.items_per_page)
            .offset(pagination.offset())
            .select(PortfolioDB::as_select())
            .load::<PortfolioDB>(&mut conn)
            .map_err(StorageError::from)?;

        let items = rows
            .into_iter()
            .map(Portfolio::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok((
            items,
            PaginationResponse::for_request(total_items, pagination),
        ))
    }

    async fn create_asset(&self, portfolio_id: i64, new_asset: NewAsset) -> Result<Asset> {
        let row = NewAssetDB {
            portfolio_id,
            symbol: new_asset.symbol,
            quantity: new_asset.quantity,
            created_at: Utc::now().naive_utc(),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let result_db = diesel::insert_into(assets::table)
                    .values(&row)
                    .returning(AssetDB::as_returning())
                    .get_result::<AssetDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }

    async fn delete_asset(&self, asset_id: i64) -> Result<bool> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let deleted = diesel::delete(assets::table.find(asset_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(deleted > 0)
            })
            .await
    }

    fn list_assets_paginated(
        &self,
        portfolio_id: i64,
        pagination: &PaginationRequest,
    ) -> Result<(Vec<Asset>, PaginationResponse)> {
        let mut conn = get_connection(&self.pool)?;

        let total_items: i64 = assets::table
            .filter(assets::portfolio_id.eq(portfolio_id))
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?;

        let rows = assets::table
            .filter(assets::portfolio_id.eq(portfolio_id))
            .order(assets::id.desc())
            .limit(pagination.items_per_page)
            .offset(pagination.offset())
            .select(AssetDB::as_select())
            .load::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok((
            rows.into_iter().map(Asset::from).collect(),
            PaginationResponse::for_request(total_items, pagination),
        ))
    }

    fn list_assets(&self, portfolio_id: i64) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = assets::table
            .filter(assets::portfolio_id.eq(portfolio_id))
            .order(assets::id.asc())
            .select(AssetDB::as_select())
            .load::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(Asset::from).collect())
    }

    fn ping(&self) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        portfolios::table
            .select(portfolios::id)
            .limit(1)
            .load::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }
}
