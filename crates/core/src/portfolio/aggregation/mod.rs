//! Aggregation engine - holdings valuation, daily value series, alerts.

mod aggregation_calculator;
mod aggregation_model;

pub use aggregation_calculator::compute_aggregates;
pub use aggregation_model::{ChartSelection, DailyValueSeries, HoldingSummary, PortfolioAggregates};
