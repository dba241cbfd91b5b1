//! Trades module - the ledger and its ingestion.

mod trades_model;

pub use trades_model::{Trade, TradeLedger};
