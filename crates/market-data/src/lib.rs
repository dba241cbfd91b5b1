//! Coinfolio Market Data Crate
//!
//! Provider-agnostic spot price fetching for the Coinfolio tracker.
//!
//! # Overview
//!
//! This crate supplies one computation cycle's price input:
//! - [`SpotPriceProvider`] - the trait a price source implements
//! - [`CoinGeckoProvider`] - the reference implementation (CoinGecko simple-price API)
//! - [`PriceSnapshot`] - a read-only symbol -> price mapping built from quotes
//! - [`PriceResolution`] - explicit known/unknown outcome of a price lookup
//!
//! Absence of price data is not an error here: symbols a provider cannot
//! quote are simply missing from the snapshot, and lookups resolve them as
//! [`PriceResolution::Unknown`]. Collapsing unknown prices to zero is the
//! consumer's (documented) policy, not this crate's.

pub mod errors;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use models::{canonicalize_symbol, PriceResolution, PriceSnapshot, SpotQuote};

// Re-export provider types
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::SpotPriceProvider;

// Re-export error types
pub use errors::MarketDataError;
