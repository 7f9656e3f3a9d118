//! Market data interfaces: on-demand REST queries and the live kline feed.

use crate::error::MarketDataError;
use crate::models::indicators::Candle;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the most recent `limit` candles, oldest first
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;

    /// Get the latest traded price for a symbol
    async fn get_latest_price(&self, symbol: &str) -> Result<f64, MarketDataError>;
}

/// Kline update pushed by the live feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KlineEvent {
    pub symbol: String,
    pub interval: String,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub is_closed: bool,
}

impl KlineEvent {
    pub fn to_candle(&self) -> Candle {
        Candle::new(
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.open_time,
        )
    }
}

/// One live subscription session
#[async_trait]
pub trait KlineStream: Send {
    /// Next kline event; `None` once the feed has closed
    async fn next_event(&mut self) -> Option<Result<KlineEvent, MarketDataError>>;
}

/// Opens subscription sessions for a (symbol, timeframe) pair
#[async_trait]
pub trait FeedConnector: Send + Sync {
    async fn connect(
        &self,
        symbol: &str,
        timeframe: &str,
    ) -> Result<Box<dyn KlineStream>, MarketDataError>;
}
