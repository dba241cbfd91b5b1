//! The aggregation engine: one pure pass over the ledger.

use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use coinfolio_market_data::PriceSnapshot;

use crate::alerts::ThresholdTable;
use crate::trades::TradeLedger;

use super::{DailyValueSeries, HoldingSummary, PortfolioAggregates};

/// Running totals for one holdings group before valuation.
#[derive(Default)]
struct HoldingAccumulator {
    total_amount: Decimal,
    total_invested: Decimal,
    canonical_symbol: String,
}

/// Computes holdings summaries, the daily value series, and the total
/// portfolio value for one cycle.
///
/// Pure function over its three inputs: identical inputs give identical
/// outputs and nothing is retained between calls. A symbol absent from the
/// snapshot values at zero (see `PriceResolution`), depressing value and
/// profit rather than failing the cycle; a symbol absent from the
/// threshold table classifies as `AlertState::None`.
///
/// Holdings groups are keyed by the literal ledger spelling of the symbol,
/// while prices and thresholds resolve through the canonical uppercase
/// form - so `xrp` and `XRP` are separate rows sharing one price.
pub fn compute_aggregates(
    ledger: &TradeLedger,
    snapshot: &PriceSnapshot,
    thresholds: &ThresholdTable,
) -> PortfolioAggregates {
    let mut groups: HashMap<String, HoldingAccumulator> = HashMap::new();
    let mut daily_series = DailyValueSeries::default();
    let mut total_value = Decimal::ZERO;

    for trade in ledger.trades() {
        let canonical = trade.canonical_symbol();
        let current_price = snapshot.resolve(&canonical).price_or_zero();
        let value = trade.amount * current_price;
        total_value += value;

        daily_series.record(&canonical, trade.date, value);

        let group = groups.entry(trade.coin.clone()).or_default();
        group.total_amount += trade.amount;
        group.total_invested += trade.invested();
        group.canonical_symbol = canonical;
    }

    let group_count = groups.len();
    let holdings: HashMap<String, HoldingSummary> = groups
        .into_iter()
        .map(|(symbol, group)| {
            let current_price = snapshot.resolve(&group.canonical_symbol).price_or_zero();
            let current_value = group.total_amount * current_price;
            let summary = HoldingSummary {
                symbol: symbol.clone(),
                total_amount: group.total_amount,
                total_invested: group.total_invested,
                current_price,
                current_value,
                unrealized_profit: current_value - group.total_invested,
                alert_state: thresholds.classify(&group.canonical_symbol, current_price),
            };
            (symbol, summary)
        })
        .collect();

    debug!(
        "Aggregated {} trades into {} holdings, total value {}",
        ledger.len(),
        group_count,
        total_value
    );

    PortfolioAggregates {
        holdings,
        daily_series,
        total_value,
    }
}
