//! Portfolio and asset domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, ValidationError};

/// A named collection of assets owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: i64,
    pub owner_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub name: String,
}

impl NewPortfolio {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.name.chars().count() > 100 {
            return Err(ValidationError::OutOfRange {
                field: "name".to_string(),
                detail: "must be 1-100 characters".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Partial update for a portfolio. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    pub name: Option<String>,
}

impl PortfolioUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.is_empty() || name.chars().count() > 100 {
                return Err(ValidationError::OutOfRange {
                    field: "name".to_string(),
                    detail: "must be 1-100 characters".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// A quantity of a tradable symbol held within a portfolio.
///
/// The symbol is stored exactly as the user entered it; normalization
/// happens at valuation time only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: i64,
    pub portfolio_id: i64,
    pub symbol: String,
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub symbol: String,
    pub quantity: f64,
}

impl NewAsset {
    pub fn validate(&self) -> Result<()> {
        if self.symbol.is_empty() || self.symbol.chars().count() > 16 {
            return Err(ValidationError::OutOfRange {
                field: "symbol".to_string(),
                detail: "must be 1-16 characters".to_string(),
            }
            .into());
        }
        if !(self.quantity > 0.0) {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                detail: "must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_name_bounds() {
        assert!(NewPortfolio {
            name: "a".to_string()
        }
        .validate()
        .is_ok());
        assert!(NewPortfolio {
            name: String::new()
        }
        .validate()
        .is_err());
        assert!(NewPortfolio {
            name: "x".repeat(101)
        }
        .validate()
        .is_err());
    }

    #[test]
    fn update_without_name_is_valid() {
        assert!(PortfolioUpdate { name: None }.validate().is_ok());
    }

    #[test]
    fn asset_quantity_must_be_positive() {
        let asset = NewAsset {
            symbol: "BTC".to_string(),
            quantity: 0.0,
        };
        assert!(asset.validate().is_err());

        let asset = NewAsset {
            symbol: "BTC".to_string(),
            quantity: f64::NAN,
        };
        assert!(asset.validate().is_err());

        let asset = NewAsset {
            symbol: "BTC".to_string(),
            quantity: 0.5,
        };
        assert!(asset.validate().is_ok());
    }

    #[test]
    fn asset_symbol_bounds() {
        let asset = NewAsset {
            symbol: "x".repeat(17),
            quantity: 1.0,
        };
        assert!(asset.validate().is_err());
    }
}
