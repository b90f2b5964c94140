//! Database models for portfolios and assets.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use folio_core::errors::{DatabaseError, Error};
use folio_core::portfolio::{Asset, Portfolio};
use uuid::Uuid;

/// Database model for portfolios
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioDB {
    pub id: i64,
    pub owner_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new portfolio
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
pub struct NewPortfolioDB {
    pub owner_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Database model for assets
#[derive(Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(PortfolioDB, foreign_key = portfolio_id))]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetDB {
    pub id: i64,
    pub portfolio_id: i64,
    pub symbol: String,
    pub quantity: f64,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new asset
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
pub struct NewAssetDB {
    pub portfolio_id: i64,
    pub symbol: String,
    pub quantity: f64,
    pub created_at: NaiveDateTime,
}

// Conversion to domain models

impl TryFrom<PortfolioDB> for Portfolio {
    type Error = Error;

    fn try_from(db: PortfolioDB) -> Result<Self, Error> {
        let owner_id = Uuid::parse_str(&db.owner_id).map_err(|e| {
            Error::Database(DatabaseError::Internal(format!(
                "portfolio owner id '{}' is not a UUID: {e}",
                db.owner_id
            )))
        })?;
        Ok(Self {
            id: db.id,
            owner_id,
            name: db.name,
            created_at: Utc.from_utc_datetime(&db.created_at),
        })
    }
}

impl From<AssetDB> for Asset {
    fn from(db: AssetDB) -> Self {
        Self {
            id: db.id,
            portfolio_id: db.portfolio_id,
            symbol: db.symbol,
            quantity: db.quantity,
            created_at: Utc.from_utc_datetime(&db.created_at),
        }
    }
}
