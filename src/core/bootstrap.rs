//! Wiring of the production collaborators

use crate::config::Config;
use crate::core::pipeline::SignalPipeline;
use crate::core::runtime::SignalRuntime;
use crate::core::service::SignalService;
use crate::metrics::Metrics;
use crate::notify::{Notifier, TelegramNotifier};
use crate::services::binance::{BinanceFeedConnector, BinanceRestClient};
use crate::services::market_data::{FeedConnector, MarketDataProvider};
use std::sync::Arc;

/// Binance feed + REST and the Telegram notifier, wired from `config`
pub fn build_runtime(config: &Config, metrics: Arc<Metrics>) -> SignalRuntime {
    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(BinanceRestClient::new(config.exchange.rest_url.clone()));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(config.telegram.clone()));
    let connector: Arc<dyn FeedConnector> =
        Arc::new(BinanceFeedConnector::new(config.exchange.ws_url.clone()));

    let pipeline = SignalPipeline::new(&config.runtime, config.alert, provider, notifier)
        .with_metrics(metrics.clone());

    SignalRuntime::new(config.runtime.clone(), connector, pipeline).with_metrics(metrics)
}

/// Service that builds a fresh production runtime on every start
pub fn build_service(config: Config, metrics: Arc<Metrics>) -> SignalService {
    SignalService::new(move || build_runtime(&config, metrics.clone()))
}
