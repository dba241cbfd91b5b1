//! Alerts module - price thresholds and zone classification.

mod alerts_model;

pub use alerts_model::{AlertState, AlertThreshold, ThresholdTable};
