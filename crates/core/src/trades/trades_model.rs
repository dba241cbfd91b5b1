//! Trade ledger domain models.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use coinfolio_market_data::canonicalize_symbol;

use crate::errors::{LedgerError, Result, ValidationError};

/// A single acquisition recorded in the ledger. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Coin symbol as entered. Case-insensitive for pricing and threshold
    /// lookups; the literal spelling is preserved for display and for
    /// holdings grouping.
    pub coin: String,

    /// Quantity acquired.
    pub amount: Decimal,

    /// Unit price at acquisition.
    pub price: Decimal,

    /// Trade date.
    pub date: NaiveDate,

    /// Free text, e.g. the exchange or wallet holding the coins.
    pub location: String,
}

impl Trade {
    /// Uppercase form used for price and threshold lookups.
    pub fn canonical_symbol(&self) -> String {
        canonicalize_symbol(&self.coin)
    }

    /// Cost of this trade at acquisition time.
    pub fn invested(&self) -> Decimal {
        self.amount * self.price
    }

    fn validate(&self, index: usize) -> std::result::Result<(), ValidationError> {
        if self.amount < Decimal::ZERO {
            return Err(ValidationError::InvalidTrade {
                index,
                coin: self.coin.clone(),
                reason: format!("negative amount {}", self.amount),
            });
        }
        if self.price < Decimal::ZERO {
            return Err(ValidationError::InvalidTrade {
                index,
                coin: self.coin.clone(),
                reason: format!("negative acquisition price {}", self.price),
            });
        }
        Ok(())
    }
}

/// Ordered, validated sequence of trades - one cycle's engine input.
///
/// Construction validates every record and rejects the whole ledger on the
/// first malformed one; the aggregation engine never sees bad input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TradeLedger {
    trades: Vec<Trade>,
}

impl TradeLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and wraps an ordered list of trades.
    pub fn from_trades(trades: Vec<Trade>) -> Result<Self> {
        for (index, trade) in trades.iter().enumerate() {
            trade.validate(index)?;
        }
        debug!("Ingested trade ledger with {} trades", trades.len());
        Ok(Self { trades })
    }

    /// Loads a JSON array of trade records (the `trades.json` shape).
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(LedgerError::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads and validates a JSON array of trade records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let trades: Vec<Trade> = serde_json::from_reader(reader).map_err(LedgerError::Parse)?;
        Self::from_trades(trades)
    }

    /// The trades in ledger order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Distinct canonical symbols in the ledger, sorted. This is the set
    /// of symbols to request quotes for.
    pub fn canonical_symbols(&self) -> Vec<String> {
        self.trades
            .iter()
            .map(|t| t.canonical_symbol())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn trade(coin: &str, amount: Decimal, price: Decimal, date: &str) -> Trade {
        Trade {
            coin: coin.to_string(),
            amount,
            price,
            date: date.parse().unwrap(),
            location: "test".to_string(),
        }
    }

    #[test]
    fn test_invested() {
        let t = trade("XRP", dec!(100), dec!(2.00), "2024-01-01");
        assert_eq!(t.invested(), dec!(200.00));
    }

    #[test]
    fn test_canonical_symbol() {
        let t = trade("xrp", dec!(1), dec!(1), "2024-01-01");
        assert_eq!(t.canonical_symbol(), "XRP");
        assert_eq!(t.coin, "xrp");
    }

    #[test]
    fn test_from_trades_rejects_negative_amount() {
        let trades = vec![
            trade("XRP", dec!(100), dec!(2.00), "2024-01-01"),
            trade("doge", dec!(-5), dec!(0.20), "2024-01-02"),
        ];
        let err = TradeLedger::from_trades(trades).unwrap_err();
        match err {
            Error::Validation(ValidationError::InvalidTrade { index, coin, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(coin, "doge");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_from_trades_rejects_negative_price() {
        let trades = vec![trade("XRP", dec!(1), dec!(-2.00), "2024-01-01")];
        assert!(TradeLedger::from_trades(trades).is_err());
    }

    #[test]
    fn test_from_reader_parses_trades_json_shape() {
        let json = r#"[
            {"coin": "XRP", "amount": 100, "price": 2.0, "date": "2024-01-01", "location": "Coinbase"},
            {"coin": "doge", "amount": 500, "price": 0.2, "date": "2024-01-02", "location": "Kraken"}
        ]"#;
        let ledger = TradeLedger::from_reader(json.as_bytes()).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.trades()[0].coin, "XRP");
        assert_eq!(ledger.trades()[0].amount, dec!(100));
        assert_eq!(ledger.trades()[1].date, "2024-01-02".parse().unwrap());
        assert_eq!(ledger.trades()[1].location, "Kraken");
    }

    #[test]
    fn test_from_reader_rejects_malformed_json() {
        let err = TradeLedger::from_reader("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::Parse(_))));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"coin": "WIF", "amount": 10, "price": 0.5, "date": "2024-03-01", "location": "ex"}}]"#
        )
        .unwrap();
        let ledger = TradeLedger::load_from_path(file.path()).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.trades()[0].coin, "WIF");
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = TradeLedger::load_from_path("/nonexistent/trades.json").unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::Io(_))));
    }

    #[test]
    fn test_canonical_symbols_dedupes_case_variants() {
        let ledger = TradeLedger::from_trades(vec![
            trade("xrp", dec!(1), dec!(1), "2024-01-01"),
            trade("XRP", dec!(1), dec!(1), "2024-01-02"),
            trade("DOGE", dec!(1), dec!(1), "2024-01-03"),
        ])
        .unwrap();
        assert_eq!(ledger.canonical_symbols(), vec!["DOGE", "XRP"]);
    }
}
