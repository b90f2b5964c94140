use std::collections::HashMap;
use std::time::Duration;

/// How long a computed portfolio valuation stays valid in the cache.
pub const VALUATION_CACHE_TTL: Duration = Duration::from_secs(30);

/// Maximum number of distinct portfolios kept in the valuation cache.
pub const VALUATION_CACHE_CAPACITY: usize = 10_000;

/// Default number of minutes an issued access token stays valid.
pub const DEFAULT_TOKEN_EXPIRES_MINUTES: i64 = 60;

/// Reference unit prices in USD for the symbols the valuation engine knows.
pub const REFERENCE_PRICES_USD: [(&str, f64); 5] = [
    ("ETH", 3191.30),
    ("BTC", 93556.62),
    ("MSFT", 467.71),
    ("NVDA", 184.82),
    ("AAPL", 260.18),
];

/// Builds the reference price table as an owned map.
pub fn reference_prices() -> HashMap<String, f64> {
    REFERENCE_PRICES_USD
        .iter()
        .map(|(symbol, price)| (symbol.to_string(), *price))
        .collect()
}
