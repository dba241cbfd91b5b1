use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quote::SpotQuote;

/// Canonical form of a coin symbol, used for price and threshold lookups.
pub fn canonicalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

/// Outcome of a price lookup.
///
/// Keeps "the price is zero" and "no price data exists" distinguishable.
/// Consumers that want the legacy default-to-zero behavior collapse this
/// with [`price_or_zero`](Self::price_or_zero).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceResolution {
    /// The snapshot holds a price for the symbol.
    Known(Decimal),
    /// The snapshot has no data for the symbol.
    Unknown,
}

impl PriceResolution {
    /// The known price, or `Decimal::ZERO` for an unknown symbol.
    pub fn price_or_zero(self) -> Decimal {
        match self {
            PriceResolution::Known(price) => price,
            PriceResolution::Unknown => Decimal::ZERO,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, PriceResolution::Known(_))
    }
}

/// Read-only mapping from canonical symbol to current unit price.
///
/// One snapshot is built per computation cycle from the quotes a provider
/// returned; it is never mutated afterwards. Lookups canonicalize their
/// argument, so `resolve("xrp")` and `resolve("XRP")` hit the same entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    prices: HashMap<String, Decimal>,
}

impl PriceSnapshot {
    /// An empty snapshot; every lookup resolves `Unknown`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from provider quotes. If a symbol appears more
    /// than once the later quote wins.
    pub fn from_quotes(quotes: &[SpotQuote]) -> Self {
        Self::from_prices(quotes.iter().map(|q| (q.symbol.as_str(), q.price)))
    }

    /// Builds a snapshot from raw (symbol, price) pairs, canonicalizing keys.
    pub fn from_prices<I, S>(prices: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let prices = prices
            .into_iter()
            .map(|(symbol, price)| (canonicalize_symbol(symbol.as_ref()), price))
            .collect();
        Self { prices }
    }

    /// Looks up the current price for a symbol.
    pub fn resolve(&self, symbol: &str) -> PriceResolution {
        match self.prices.get(&canonicalize_symbol(symbol)) {
            Some(price) => PriceResolution::Known(*price),
            None => PriceResolution::Unknown,
        }
    }

    /// Canonical symbols present in the snapshot, in no particular order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
