//! Subscription loop: one consumer per (symbol, timeframe), reconnecting with
//! exponential backoff whenever the feed goes away.

use crate::config::RuntimeConfig;
use crate::core::pipeline::SignalPipeline;
use crate::error::MarketDataError;
use crate::metrics::Metrics;
use crate::services::market_data::{FeedConnector, KlineStream};
use backon::{ExponentialBuilder, Retryable};
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

/// Why a subscription session ended
#[derive(Debug)]
pub enum SessionEnd {
    /// The feed closed the stream
    Closed,
    /// No event arrived within the idle timeout
    Idle,
    /// Transport failure
    Failed(MarketDataError),
}

pub struct SignalRuntime {
    config: RuntimeConfig,
    connector: Arc<dyn FeedConnector>,
    pipeline: SignalPipeline,
    metrics: Option<Arc<Metrics>>,
}

impl SignalRuntime {
    pub fn new(
        config: RuntimeConfig,
        connector: Arc<dyn FeedConnector>,
        pipeline: SignalPipeline,
    ) -> Self {
        Self {
            config,
            connector,
            pipeline,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run until the task is cancelled
    pub async fn run(mut self) {
        info!(
            symbol = %self.config.symbol,
            timeframe = %self.config.timeframe,
            window = self.config.window_size,
            "SignalRuntime: starting subscription loop"
        );

        let mut sessions: u64 = 0;
        loop {
            let stream = self.connect().await;
            if sessions > 0 {
                if let Some(ref metrics) = self.metrics {
                    metrics.feed_reconnects_total.inc();
                }
            }
            sessions += 1;

            self.set_connected(true);
            let end = self.run_session(stream).await;
            self.set_connected(false);

            match end {
                SessionEnd::Closed => warn!("Kline stream closed, reconnecting"),
                SessionEnd::Idle => warn!(
                    idle = ?self.config.feed_idle_timeout,
                    "No kline event within idle timeout, reconnecting"
                ),
                SessionEnd::Failed(e) => error!(error = %e, "Kline stream failed, reconnecting"),
            }

            sleep(self.config.reconnect_min_delay).await;
        }
    }

    /// Consume one session until it ends. Events are processed strictly one at
    /// a time.
    pub async fn run_session(&mut self, mut stream: Box<dyn KlineStream>) -> SessionEnd {
        loop {
            let next = match timeout(self.config.feed_idle_timeout, stream.next_event()).await {
                Ok(next) => next,
                Err(_) => return SessionEnd::Idle,
            };

            match next {
                None => return SessionEnd::Closed,
                Some(Ok(event)) => {
                    self.pipeline.on_kline(&event).await;
                }
                Some(Err(e @ (MarketDataError::Json(_) | MarketDataError::Malformed(_)))) => {
                    warn!(error = %e, "Skipping undecodable kline message");
                }
                Some(Err(e)) => return SessionEnd::Failed(e),
            }
        }
    }

    pub fn pipeline(&self) -> &SignalPipeline {
        &self.pipeline
    }

    /// Open a session, retrying with exponential backoff until it succeeds
    async fn connect(&self) -> Box<dyn KlineStream> {
        let connector = &self.connector;
        let symbol = self.config.symbol.as_str();
        let timeframe = self.config.timeframe.as_str();

        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.config.reconnect_min_delay)
            .with_max_delay(self.config.reconnect_max_delay)
            .without_max_times();

        let result = (|| async move { connector.connect(symbol, timeframe).await })
            .retry(backoff)
            .notify(|e: &MarketDataError, delay| {
                warn!(error = %e, delay = ?delay, "Kline stream connect failed, retrying");
            })
            .await;

        match result {
            Ok(stream) => stream,
            // unreachable with unlimited retries
            Err(e) => {
                error!(error = %e, "Giving up on kline stream");
                std::future::pending().await
            }
        }
    }

    fn set_connected(&self, connected: bool) {
        if let Some(ref metrics) = self.metrics {
            metrics.feed_connected.set(if connected { 1.0 } else { 0.0 });
        }
    }
}
