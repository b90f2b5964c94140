//! Pricing of a portfolio's assets against a reference price table.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::portfolio_model::Asset;

/// One priced asset inside a valuation.
///
/// `symbol` is the asset's stored symbol, not the normalized lookup key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationLine {
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
    pub value: f64,
}

/// The computed value of a portfolio against a reference price table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub portfolio_id: i64,
    pub total_value: f64,
    pub lines: Vec<ValuationLine>,
    pub unknown_symbols: Vec<String>,
}

impl PortfolioValuation {
    /// Prices `assets` in iteration order.
    ///
    /// Symbols are uppercased and trimmed for the price lookup only. Symbols
    /// with no reference price are reported (normalized, deduplicated,
    /// sorted) rather than treated as an error.
    pub fn compute(portfolio_id: i64, assets: &[Asset], prices: &HashMap<String, f64>) -> Self {
        let mut total = 0.0;
        let mut lines = Vec::new();
        let mut unknown = BTreeSet::new();

        for asset in assets {
            let lookup = asset.symbol.trim().to_uppercase();
            match prices.get(&lookup) {
                Some(&price) => {
                    let value = asset.quantity * price;
                    lines.push(ValuationLine {
                        symbol: asset.symbol.clone(),
                        quantity: asset.quantity,
                        price,
                        value,
                    });
                    total += value;
                }
                None => {
                    unknown.insert(lookup);
                }
            }
        }

        Self {
            portfolio_id,
            total_value: total,
            lines,
            unknown_symbols: unknown.into_iter().collect(),
        }
    }
}
