use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single spot price observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotQuote {
    /// Canonical (uppercase) coin symbol, e.g. "XRP"
    pub symbol: String,

    /// Timestamp of the observation
    pub timestamp: DateTime<Utc>,

    /// Current unit price
    pub price: Decimal,

    /// Quote currency
    pub currency: String,

    /// Source of the quote (COINGECKO, MANUAL, etc.)
    pub source: String,
}

impl SpotQuote {
    pub fn new(
        symbol: String,
        timestamp: DateTime<Utc>,
        price: Decimal,
        currency: String,
        source: String,
    ) -> Self {
        Self {
            symbol,
            timestamp,
            price,
            currency,
            source,
        }
    }
}
