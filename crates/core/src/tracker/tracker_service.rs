//! Periodic refresh driver.
//!
//! Each cycle fetches fresh quotes, rebuilds the price snapshot, and
//! recomputes every aggregate from scratch; no incremental state survives
//! between cycles. The loop is a cooperative task with a shutdown handle,
//! and a failed refresh keeps the previous cycle's output, marked stale.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use coinfolio_market_data::{PriceSnapshot, SpotPriceProvider};

use crate::alerts::ThresholdTable;
use crate::errors::Result;
use crate::goals::{Goal, GoalProgress};
use crate::portfolio::{compute_aggregates, PortfolioAggregates};
use crate::trades::TradeLedger;

/// Refresh period of the reference deployment.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(10);

/// Output of the latest completed cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerState {
    pub aggregates: PortfolioAggregates,
    pub goal_progress: GoalProgress,
    /// When the values were computed.
    pub refreshed_at: DateTime<Utc>,
    /// True once a later refresh has failed; the values are the last good
    /// cycle's and consumers should surface the staleness.
    pub stale: bool,
}

/// Drives refresh cycles over a fixed ledger: fetch quotes, rebuild the
/// snapshot, recompute aggregates, publish.
pub struct TrackerService {
    provider: Arc<dyn SpotPriceProvider>,
    ledger: TradeLedger,
    thresholds: ThresholdTable,
    goal: Goal,
    symbols: Vec<String>,
    state: RwLock<Option<TrackerState>>,
}

impl TrackerService {
    pub fn new(
        provider: Arc<dyn SpotPriceProvider>,
        ledger: TradeLedger,
        thresholds: ThresholdTable,
        goal: Goal,
    ) -> Self {
        let symbols = ledger.canonical_symbols();
        Self {
            provider,
            ledger,
            thresholds,
            goal,
            symbols,
            state: RwLock::new(None),
        }
    }

    /// The latest completed cycle's output, or `None` before the first
    /// successful refresh.
    pub async fn state(&self) -> Option<TrackerState> {
        self.state.read().await.clone()
    }

    /// Runs one full cycle: fetch, snapshot, aggregate, publish.
    ///
    /// On fetch failure the previously published state is kept and marked
    /// stale, and the error propagates to the caller.
    pub async fn refresh_once(&self) -> Result<()> {
        match self.provider.spot_prices(&self.symbols).await {
            Ok(quotes) => {
                let snapshot = PriceSnapshot::from_quotes(&quotes);
                let aggregates = compute_aggregates(&self.ledger, &snapshot, &self.thresholds);
                let goal_progress = GoalProgress::measure(&self.goal, aggregates.total_value);
                debug!(
                    "Cycle complete: {} holdings, total value {}",
                    aggregates.holdings.len(),
                    aggregates.total_value
                );
                let mut state = self.state.write().await;
                *state = Some(TrackerState {
                    aggregates,
                    goal_progress,
                    refreshed_at: Utc::now(),
                    stale: false,
                });
                Ok(())
            }
            Err(e) => {
                error!("Price refresh failed, keeping previous output: {}", e);
                let mut state = self.state.write().await;
                if let Some(state) = state.as_mut() {
                    state.stale = true;
                }
                Err(e.into())
            }
        }
    }

    /// Starts the periodic loop and returns its shutdown handle.
    ///
    /// Cycles never overlap: the next tick is not serviced until the
    /// previous refresh has finished, and a missed tick is delayed rather
    /// than burst.
    pub fn spawn(self: Arc<Self>, period: Duration) -> TrackerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let service = self;
        let join = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // refresh_once already logged any failure; the
                        // loop keeps running on the previous output.
                        let _ = service.refresh_once().await;
                    }
                    _ = shutdown_rx.changed() => {
                        debug!("Tracker loop shutting down");
                        break;
                    }
                }
            }
        });
        TrackerHandle {
            shutdown: shutdown_tx,
            join,
        }
    }
}

/// Cancellation handle for a spawned tracker loop.
pub struct TrackerHandle {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl TrackerHandle {
    /// Signals the loop to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.join.await;
    }
}
