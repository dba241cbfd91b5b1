//! Spot price provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::SpotQuote;

/// Trait for spot price sources.
///
/// Implement this trait to add support for a new price source. The tracker
/// only needs the latest price per symbol, so the surface is deliberately
/// small.
#[async_trait]
pub trait SpotPriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINGECKO". Used for logging and
    /// as the `source` field of returned quotes.
    fn id(&self) -> &'static str;

    /// Fetch the latest spot price for each of the given canonical symbols.
    ///
    /// Symbols the provider cannot quote are omitted from the result, not
    /// reported as errors; the snapshot resolves them as unknown. An `Err`
    /// means the fetch itself failed and no quotes are available.
    async fn spot_prices(&self, symbols: &[String]) -> Result<Vec<SpotQuote>, MarketDataError>;
}
