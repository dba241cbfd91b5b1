//! Core error types for the Coinfolio tracker.
//!
//! The aggregation engine itself is total: it raises no errors on
//! well-typed input. Everything here belongs to the ingestion and refresh
//! layers, which validate and fail fast before the engine runs.

use thiserror::Error;

use coinfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the tracker core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Trade ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Validation errors for ingested trade records.
///
/// A malformed record rejects the whole ledger, naming the offender,
/// rather than letting a bad value propagate silently through the sums.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid trade #{index} ({coin}): {reason}")]
    InvalidTrade {
        index: usize,
        coin: String,
        reason: String,
    },
}

/// Errors raised while loading a trade ledger file.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The ledger file could not be read.
    #[error("Failed to read ledger file: {0}")]
    Io(#[from] std::io::Error),

    /// The ledger file is not a valid JSON array of trade records.
    #[error("Failed to parse ledger JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
