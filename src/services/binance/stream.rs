//! Binance kline WebSocket feed

use super::messages::{parse_kline_event, stream_symbol};
use crate::error::MarketDataError;
use crate::services::market_data::{FeedConnector, KlineEvent, KlineStream};
use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

pub struct BinanceFeedConnector {
    ws_url: String,
}

impl BinanceFeedConnector {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `wss://host/ws/icpusdt@kline_1m`
    pub fn stream_url(&self, symbol: &str, timeframe: &str) -> String {
        format!(
            "{}/ws/{}@kline_{}",
            self.ws_url,
            stream_symbol(symbol),
            timeframe
        )
    }
}

#[async_trait]
impl FeedConnector for BinanceFeedConnector {
    async fn connect(
        &self,
        symbol: &str,
        timeframe: &str,
    ) -> Result<Box<dyn KlineStream>, MarketDataError> {
        let url = self.stream_url(symbol, timeframe);
        info!(url = %url, "Connecting to kline stream");
        let (socket, _response) = connect_async(url.as_str()).await?;
        info!(url = %url, "Kline stream connected");
        Ok(Box::new(BinanceKlineStream { socket }))
    }
}

pub struct BinanceKlineStream {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl KlineStream for BinanceKlineStream {
    async fn next_event(&mut self) -> Option<Result<KlineEvent, MarketDataError>> {
        loop {
            let message = match self.socket.next().await? {
                Ok(message) => message,
                Err(e) => return Some(Err(e.into())),
            };

            match message {
                Message::Text(text) => return Some(parse_kline_event(&text)),
                Message::Binary(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => return Some(parse_kline_event(&text)),
                    Err(e) => {
                        warn!(error = %e, "Dropping non UTF-8 binary frame");
                    }
                },
                // tungstenite queues the pong reply itself
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
                Message::Close(frame) => {
                    debug!(frame = ?frame, "Kline stream sent close frame");
                    return None;
                }
            }
        }
    }
}
