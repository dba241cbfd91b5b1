// Test cases for the tracker service.
#[cfg(test)]
mod tests {
    use crate::alerts::{AlertState, ThresholdTable};
    use crate::goals::Goal;
    use crate::tracker::TrackerService;
    use crate::trades::{Trade, TradeLedger};
    use async_trait::async_trait;
    use chrono::Utc;
    use coinfolio_market_data::{MarketDataError, SpotPriceProvider, SpotQuote};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    // --- Mock provider ---

    struct MockProvider {
        prices: Vec<(String, Decimal)>,
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(prices: &[(&str, Decimal)]) -> Self {
            Self {
                prices: prices
                    .iter()
                    .map(|(symbol, price)| (symbol.to_string(), *price))
                    .collect(),
                fail: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SpotPriceProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn spot_prices(
            &self,
            symbols: &[String],
        ) -> Result<Vec<SpotQuote>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(MarketDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: "simulated outage".to_string(),
                });
            }
            Ok(self
                .prices
                .iter()
                .filter(|(symbol, _)| symbols.contains(symbol))
                .map(|(symbol, price)| {
                    SpotQuote::new(
                        symbol.clone(),
                        Utc::now(),
                        *price,
                        "USD".to_string(),
                        "MOCK".to_string(),
                    )
                })
                .collect())
        }
    }

    fn xrp_ledger() -> TradeLedger {
        TradeLedger::from_trades(vec![Trade {
            coin: "XRP".to_string(),
            amount: dec!(100),
            price: dec!(2.00),
            date: "2024-01-01".parse().unwrap(),
            location: "ex".to_string(),
        }])
        .unwrap()
    }

    fn service(provider: Arc<MockProvider>) -> TrackerService {
        TrackerService::new(
            provider,
            xrp_ledger(),
            ThresholdTable::reference(),
            Goal::reference(),
        )
    }

    #[tokio::test]
    async fn test_no_state_before_first_refresh() {
        let tracker = service(Arc::new(MockProvider::new(&[("XRP", dec!(3.50))])));
        assert!(tracker.state().await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_once_publishes_aggregates_and_goal() {
        let tracker = service(Arc::new(MockProvider::new(&[("XRP", dec!(3.50))])));
        tracker.refresh_once().await.unwrap();

        let state = tracker.state().await.unwrap();
        assert!(!state.stale);
        assert_eq!(state.aggregates.total_value, dec!(350));
        let holding = &state.aggregates.holdings["XRP"];
        assert_eq!(holding.unrealized_profit, dec!(150));
        assert_eq!(holding.alert_state, AlertState::SoftZone);
        assert_eq!(state.goal_progress.percent, 70.0);
        assert!(!state.goal_progress.is_achieved);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_output_marked_stale() {
        let provider = Arc::new(MockProvider::new(&[("XRP", dec!(3.50))]));
        let tracker = service(provider.clone());

        tracker.refresh_once().await.unwrap();
        provider.set_failing(true);
        assert!(tracker.refresh_once().await.is_err());

        let state = tracker.state().await.unwrap();
        assert!(state.stale);
        // Values are the last good cycle's.
        assert_eq!(state.aggregates.total_value, dec!(350));

        // A successful refresh clears the staleness.
        provider.set_failing(false);
        tracker.refresh_once().await.unwrap();
        assert!(!tracker.state().await.unwrap().stale);
    }

    #[tokio::test]
    async fn test_failed_refresh_with_no_previous_output_stays_empty() {
        let provider = Arc::new(MockProvider::new(&[("XRP", dec!(3.50))]));
        provider.set_failing(true);
        let tracker = service(provider);

        assert!(tracker.refresh_once().await.is_err());
        assert!(tracker.state().await.is_none());
    }

    #[tokio::test]
    async fn test_spawned_loop_refreshes_and_shuts_down() {
        let provider = Arc::new(MockProvider::new(&[("XRP", dec!(3.50))]));
        let tracker = Arc::new(service(provider.clone()));

        let handle = tracker.clone().spawn(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.shutdown().await;

        let calls_at_shutdown = provider.calls();
        assert!(calls_at_shutdown >= 1);
        assert!(tracker.state().await.is_some());

        // No further cycles after shutdown.
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(provider.calls(), calls_at_shutdown);
    }
}
