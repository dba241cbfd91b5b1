//! CoinGecko provider for live spot prices.
//!
//! Fetches current USD prices from the CoinGecko simple-price endpoint.
//! Only coins present in the id table can be quoted; symbols without an id
//! are skipped with a warning. The free API tier needs no key.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use lazy_static::lazy_static;
use log::warn;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{canonicalize_symbol, SpotQuote};
use crate::provider::SpotPriceProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "COINGECKO";

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Currency all quotes are denominated in
const QUOTE_CURRENCY: &str = "USD";

/// CoinGecko's lowercase form of the quote currency
const VS_CURRENCY: &str = "usd";

lazy_static! {
    /// Canonical symbol -> CoinGecko coin id.
    static ref COIN_IDS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("XRP", "ripple");
        m.insert("DOGE", "dogecoin");
        m.insert("PEPE", "pepe");
        m.insert("BONK", "bonk");
        m.insert("SHIB", "shiba-inu");
        m.insert("WIF", "dogwifhat");
        m
    };
}

/// One coin's entry in the simple-price response, keyed by vs-currency.
#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<f64>,
}

/// CoinGecko spot price provider.
///
/// # Example
///
/// ```ignore
/// use coinfolio_market_data::CoinGeckoProvider;
///
/// let provider = CoinGeckoProvider::new();
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Create a provider against the public CoinGecko API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a provider against a custom base URL (test servers, proxies).
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    /// CoinGecko id for a canonical symbol, if the coin is known.
    fn coin_id(symbol: &str) -> Option<&'static str> {
        COIN_IDS.get(symbol).copied()
    }

    /// Turns a parsed simple-price payload into quotes for the requested
    /// symbols. Symbols missing from the id table or the payload are
    /// omitted.
    fn quotes_from_response(
        symbols: &[String],
        payload: &HashMap<String, SimplePrice>,
    ) -> Vec<SpotQuote> {
        let now = Utc::now();
        let mut quotes = Vec::new();
        for symbol in symbols {
            let canonical = canonicalize_symbol(symbol);
            let id = match Self::coin_id(&canonical) {
                Some(id) => id,
                None => continue,
            };
            let price = match payload.get(id).and_then(|entry| entry.usd) {
                Some(price) => price,
                None => continue,
            };
            match Decimal::try_from(price) {
                Ok(price) => quotes.push(SpotQuote::new(
                    canonical,
                    now,
                    price,
                    QUOTE_CURRENCY.to_string(),
                    PROVIDER_ID.to_string(),
                )),
                Err(_) => warn!(
                    "Discarding unrepresentable price {} for {}",
                    price, canonical
                ),
            }
        }
        quotes
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpotPriceProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn spot_prices(&self, symbols: &[String]) -> Result<Vec<SpotQuote>, MarketDataError> {
        let ids: Vec<&str> = symbols
            .iter()
            .filter_map(|symbol| {
                let canonical = canonicalize_symbol(symbol);
                let id = Self::coin_id(&canonical);
                if id.is_none() {
                    warn!("No CoinGecko id for symbol {}, skipping", canonical);
                }
                id
            })
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url,
            ids.join(","),
            VS_CURRENCY
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let payload: HashMap<String, SimplePrice> =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self::quotes_from_response(symbols, &payload))
    }
}
