//! Portfolio module - domain models, services, and traits.

mod portfolio_model;
mod portfolio_service;
#[cfg(test)]
mod portfolio_service_tests;
mod portfolio_traits;
mod valuation;

pub use portfolio_model::{Asset, NewAsset, NewPortfolio, Portfolio, PortfolioUpdate};
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
pub use valuation::{PortfolioValuation, ValuationLine};
