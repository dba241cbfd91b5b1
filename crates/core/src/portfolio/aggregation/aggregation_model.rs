//! Aggregation engine output models.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use coinfolio_market_data::canonicalize_symbol;

use crate::alerts::AlertState;

/// Valuation summary for one holdings group.
///
/// Groups are keyed by the symbol spelling as it appears in the ledger;
/// pricing and alert lookups use the canonical uppercase form, so two
/// spellings of the same coin form two groups that share one price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingSummary {
    /// Symbol exactly as spelled in the ledger.
    pub symbol: String,

    /// Sum of amounts over the group.
    pub total_amount: Decimal,

    /// Sum of amount x acquisition price over the group.
    pub total_invested: Decimal,

    /// Current unit price from the snapshot; zero when unknown.
    pub current_price: Decimal,

    /// total_amount x current_price.
    pub current_value: Decimal,

    /// current_value - total_invested.
    pub unrealized_profit: Decimal,

    /// Zone of the current unit price relative to the coin's thresholds.
    pub alert_state: AlertState,
}

/// Which value series to extract chart points from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSelection {
    /// The whole portfolio.
    All,
    /// One coin, by symbol (any casing).
    Coin(String),
}

/// Portfolio value summed per trade date.
///
/// Values accumulate when several trades share a date; dates with no
/// trades are absent, not zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyValueSeries {
    /// date -> summed current value of every trade on that date.
    pub aggregate: HashMap<NaiveDate, Decimal>,

    /// canonical symbol -> date -> summed current value.
    pub per_coin: HashMap<String, HashMap<NaiveDate, Decimal>>,
}

impl DailyValueSeries {
    pub(crate) fn record(&mut self, canonical_symbol: &str, date: NaiveDate, value: Decimal) {
        *self.aggregate.entry(date).or_insert(Decimal::ZERO) += value;
        *self
            .per_coin
            .entry(canonical_symbol.to_string())
            .or_default()
            .entry(date)
            .or_insert(Decimal::ZERO) += value;
    }

    /// Chart-ready (date, value) points, sorted ascending by date.
    ///
    /// Selecting a coin the series has never seen yields an empty list.
    pub fn chart_points(&self, selection: &ChartSelection) -> Vec<(NaiveDate, Decimal)> {
        let source = match selection {
            ChartSelection::All => Some(&self.aggregate),
            ChartSelection::Coin(symbol) => self.per_coin.get(&canonicalize_symbol(symbol)),
        };
        let mut points: Vec<(NaiveDate, Decimal)> = source
            .map(|series| series.iter().map(|(date, value)| (*date, *value)).collect())
            .unwrap_or_default();
        points.sort_by_key(|(date, _)| *date);
        points
    }
}

/// Full output of one computation cycle.
///
/// Map iteration order is unspecified; consumers sort for display (the
/// chart helper above does so for dates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAggregates {
    /// Holdings summaries keyed by literal ledger spelling.
    pub holdings: HashMap<String, HoldingSummary>,

    /// Daily value series, aggregate and per coin.
    pub daily_series: DailyValueSeries,

    /// Sum of every trade's current value.
    pub total_value: Decimal,
}
