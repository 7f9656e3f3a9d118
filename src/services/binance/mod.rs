//! Binance market data: REST history/ticker and the kline stream

pub mod messages;
pub mod rest;
pub mod stream;

pub use rest::BinanceRestClient;
pub use stream::{BinanceFeedConnector, BinanceKlineStream};
