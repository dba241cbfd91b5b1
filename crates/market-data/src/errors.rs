//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching spot prices.
///
/// Note that an unquotable symbol is not an error: providers omit symbols
/// they cannot price and the snapshot resolves them as unknown. These
/// variants cover failures of the fetch itself.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-success status, bad payload).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
