//! Wire DTOs and request validation.
//!
//! Validation happens here, before anything reaches the core services:
//! malformed input never makes it past the router layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_core::auth::User;
use folio_core::portfolio::{Asset, Portfolio, PortfolioValuation, ValuationLine};
use folio_core::utils::pagination::{PaginationRequest, PaginationResponse};

use crate::error::ApiError;

// ----------------- Auth -----------------

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let (local, domain) = self
            .email
            .split_once('@')
            .ok_or_else(|| ApiError::bad_request("email is not valid"))?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(ApiError::bad_request("email is not valid"));
        }
        let len = self.password.chars().count();
        if !(12..=128).contains(&len) {
            return Err(ApiError::bad_request("password must be 12-128 characters"));
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Body of register/login responses. The token also travels in the auth
/// cookie; it is repeated here for clients that prefer bearer headers.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserResponse,
    pub access_token: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: UserResponse,
}

// ----------------- Pagination -----------------

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub items_per_page: Option<i64>,
}

impl PaginationQuery {
    pub fn validate(self) -> Result<PaginationRequest, ApiError> {
        let page = self.page.unwrap_or(1);
        let items_per_page = self.items_per_page.unwrap_or(20);
        if page < 1 {
            return Err(ApiError::bad_request("page must be >= 1"));
        }
        if !(1..=100).contains(&items_per_page) {
            return Err(ApiError::bad_request("itemsPerPage must be in 1-100"));
        }
        Ok(PaginationRequest::new(page, items_per_page))
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub pagination_response: PaginationResponse,
}

// ----------------- Portfolios -----------------

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCreateRequest {
    pub name: String,
}

impl PortfolioCreateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_name(&self.name)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPatchRequest {
    pub name: Option<String>,
}

impl PortfolioPatchRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() || name.chars().count() > 100 {
        return Err(ApiError::bad_request("name must be 1-100 characters"));
    }
    Ok(())
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub id: i64,
    pub owner_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Portfolio> for PortfolioResponse {
    fn from(p: Portfolio) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            name: p.name,
            created_at: p.created_at,
        }
    }
}

// ----------------- Assets -----------------

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetCreateRequest {
    pub symbol: String,
    pub quantity: f64,
}

impl AssetCreateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.symbol.is_empty() || self.symbol.chars().count() > 16 {
            return Err(ApiError::bad_request("symbol must be 1-16 characters"));
        }
        if !(self.quantity > 0.0) {
            return Err(ApiError::bad_request("quantity must be positive"));
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    pub id: i64,
    pub portfolio_id: i64,
    pub symbol: String,
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Asset> for AssetResponse {
    fn from(a: Asset) -> Self {
        Self {
            id: a.id,
            portfolio_id: a.portfolio_id,
            symbol: a.symbol,
            quantity: a.quantity,
            created_at: a.created_at,
        }
    }
}

// ----------------- Valuation -----------------

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValuationLineResponse {
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
    pub value: f64,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuationResponse {
    pub portfolio_id: i64,
    pub total_value: f64,
    pub lines: Vec<ValuationLineResponse>,
    pub unknown_symbols: Vec<String>,
}

impl From<&PortfolioValuation> for PortfolioValuationResponse {
    fn from(v: &PortfolioValuation) -> Self {
        Self {
            portfolio_id: v.portfolio_id,
            total_value: v.total_value,
            lines: v.lines.iter().map(ValuationLineResponse::from).collect(),
            unknown_symbols: v.unknown_symbols.clone(),
        }
    }
}

impl From<&ValuationLine> for ValuationLineResponse {
    fn from(line: &ValuationLine) -> Self {
        Self {
            symbol: line.symbol.clone(),
            quantity: line.quantity,
            price: line.price,
            value: line.value,
        }
    }
}
