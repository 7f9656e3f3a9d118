//! Closed-candle processing: refresh the window, recompute MACD, and notify on
//! a full crossover.

use crate::config::{AlertConfig, MacdParams, RuntimeConfig};
use crate::error::MarketDataError;
use crate::metrics::Metrics;
use crate::models::signal::{SignalEdge, TradeAlert};
use crate::notify::{send_within, Notifier};
use crate::services::history::PriceHistory;
use crate::services::market_data::{KlineEvent, MarketDataProvider};
use crate::signals::alert::build_alert;
use crate::signals::derivation::detect_transition;
use crate::signals::engine::SignalEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// What happened to a single kline event
#[derive(Debug, Clone, PartialEq)]
pub enum CandleOutcome {
    /// The candle is still forming
    Ignored,
    /// History could not be refreshed; the candle was skipped
    HistoryUnavailable,
    /// Recomputed, no full crossover on the closed candle
    NoSignal,
    /// An edge fired but no entry price could be obtained
    PriceUnavailable(SignalEdge),
    /// Alert handed to the notifier and delivered
    Notified(TradeAlert),
    /// Alert built but delivery failed
    DeliveryFailed(TradeAlert),
}

pub struct SignalPipeline {
    provider: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn Notifier>,
    history: PriceHistory,
    params: MacdParams,
    alert: AlertConfig,
    request_timeout: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl SignalPipeline {
    pub fn new(
        config: &RuntimeConfig,
        alert: AlertConfig,
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            notifier,
            history: PriceHistory::new(&config.symbol, &config.timeframe, config.window_size),
            params: config.macd,
            alert,
            request_timeout: config.request_timeout,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Process one kline event end to end
    pub async fn on_kline(&mut self, event: &KlineEvent) -> CandleOutcome {
        if !event.is_closed {
            return CandleOutcome::Ignored;
        }

        let symbol = self.history.symbol().to_string();
        let timeframe = self.history.timeframe().to_string();

        // One extra candle covers the still-forming bar the exchange may include
        let limit = self.history.capacity() + 1;
        let fetched = match self
            .bounded(self.provider.get_candles(&symbol, &timeframe, limit))
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                error!(symbol = %symbol, timeframe = %timeframe, error = %e, "Failed to refresh candle history, skipping candle");
                if let Some(ref metrics) = self.metrics {
                    metrics.processing_errors_total.inc();
                }
                return CandleOutcome::HistoryUnavailable;
            }
        };

        self.history.refresh(fetched, event.open_time);
        if self.history.complete_with(event.to_candle()) {
            debug!(
                symbol = %symbol,
                open_time = %event.open_time,
                "History lags the stream, using the closed kline from the event"
            );
        }
        if let Some(ref metrics) = self.metrics {
            metrics.candles_processed_total.inc();
        }

        let rows = SignalEngine::evaluate(&self.history.candles(), &self.params);
        let Some(edge) = detect_transition(&rows) else {
            if let Some(last) = rows.last() {
                debug!(
                    symbol = %symbol,
                    close = last.candle.close,
                    macd = last.macd,
                    signal_line = last.signal_line,
                    position = ?last.position,
                    "No crossover on closed candle"
                );
            }
            return CandleOutcome::NoSignal;
        };

        info!(symbol = %symbol, edge = %edge, "Crossover detected");
        if let Some(ref metrics) = self.metrics {
            metrics.signals_total.with_label_values(&[edge.as_str()]).inc();
        }

        let price = self.current_price(&symbol).await;
        let Some(alert) = build_alert(edge, price, &self.alert) else {
            warn!(symbol = %symbol, edge = %edge, "No entry price available, notification dropped");
            if let Some(ref metrics) = self.metrics {
                metrics.price_unavailable_total.inc();
            }
            return CandleOutcome::PriceUnavailable(edge);
        };

        let text = alert.message();
        let delivery = send_within(self.notifier.as_ref(), &text, self.request_timeout).await;

        match delivery {
            Ok(()) => {
                info!(symbol = %symbol, edge = %edge, entry = alert.entry_price, "Notification sent");
                if let Some(ref metrics) = self.metrics {
                    metrics.notifications_sent_total.inc();
                }
                CandleOutcome::Notified(alert)
            }
            Err(e) => {
                error!(symbol = %symbol, edge = %edge, error = %e, "Failed to send notification");
                if let Some(ref metrics) = self.metrics {
                    metrics.notifications_failed_total.inc();
                }
                CandleOutcome::DeliveryFailed(alert)
            }
        }
    }

    /// Latest price, or `None` if the query fails
    async fn current_price(&self, symbol: &str) -> Option<f64> {
        match self.bounded(self.provider.get_latest_price(symbol)).await {
            Ok(price) => Some(price),
            Err(e) => {
                error!(symbol = %symbol, error = %e, "Error fetching market price");
                None
            }
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, MarketDataError>
    where
        F: std::future::Future<Output = Result<T, MarketDataError>>,
    {
        timeout(self.request_timeout, fut)
            .await
            .unwrap_or(Err(MarketDataError::Timeout(self.request_timeout)))
    }
}
