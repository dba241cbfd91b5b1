//! Alert thresholds and zone classification.
//!
//! Classification is a function of the current unit price alone, never of
//! position size or value.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use coinfolio_market_data::canonicalize_symbol;

/// Alert zone for a coin at its current unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AlertState {
    /// No threshold configured, or price below the soft-sell level.
    #[default]
    None,
    /// Price at or above the soft-sell level, below target.
    SoftZone,
    /// Price at or above the target level.
    TargetHit,
}

/// Price levels configured for one coin.
///
/// `soft <= target` by convention; not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThreshold {
    /// Soft-sell price level.
    pub soft: Decimal,
    /// Target price level.
    pub target: Decimal,
}

impl AlertThreshold {
    /// Zone for the given current unit price.
    pub fn classify(&self, price: Decimal) -> AlertState {
        if price >= self.target {
            AlertState::TargetHit
        } else if price >= self.soft {
            AlertState::SoftZone
        } else {
            AlertState::None
        }
    }
}

/// Static mapping from canonical symbol to alert thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    entries: HashMap<String, AlertThreshold>,
}

impl ThresholdTable {
    /// An empty table; every coin classifies as `AlertState::None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from (symbol, threshold) pairs, canonicalizing keys.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, AlertThreshold)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(symbol, threshold)| (canonicalize_symbol(symbol.as_ref()), threshold))
            .collect();
        Self { entries }
    }

    /// The six-coin reference deployment, in USD.
    pub fn reference() -> Self {
        Self::from_entries([
            (
                "XRP",
                AlertThreshold {
                    soft: dec!(3.00),
                    target: dec!(4.00),
                },
            ),
            (
                "DOGE",
                AlertThreshold {
                    soft: dec!(0.25),
                    target: dec!(0.30),
                },
            ),
            (
                "PEPE",
                AlertThreshold {
                    soft: dec!(0.000010),
                    target: dec!(0.000012),
                },
            ),
            (
                "BONK",
                AlertThreshold {
                    soft: dec!(0.000017),
                    target: dec!(0.000022),
                },
            ),
            (
                "SHIB",
                AlertThreshold {
                    soft: dec!(0.000016),
                    target: dec!(0.000025),
                },
            ),
            (
                "WIF",
                AlertThreshold {
                    soft: dec!(0.75),
                    target: dec!(1.25),
                },
            ),
        ])
    }

    /// Threshold entry for a symbol, if one is configured.
    pub fn get(&self, symbol: &str) -> Option<&AlertThreshold> {
        self.entries.get(&canonicalize_symbol(symbol))
    }

    /// Classification for a coin at the given current unit price.
    ///
    /// A coin with no configured entry is always `AlertState::None`,
    /// whatever its price.
    pub fn classify(&self, symbol: &str, price: Decimal) -> AlertState {
        match self.get(symbol) {
            Some(threshold) => threshold.classify(price),
            None => AlertState::None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
