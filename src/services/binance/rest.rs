//! Binance spot REST client (public market data only)

use super::messages::{parse_kline_row, parse_price, rest_symbol, TickerPrice};
use crate::error::MarketDataError;
use crate::models::indicators::Candle;
use crate::services::market_data::MarketDataProvider;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

pub struct BinanceRestClient {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceRestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, MarketDataError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl MarketDataProvider for BinanceRestClient {
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let pair = rest_symbol(symbol);
        let body = self
            .get_json(
                "/api/v3/klines",
                &[
                    ("symbol", pair.clone()),
                    ("interval", timeframe.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        let rows = body
            .as_array()
            .ok_or_else(|| MarketDataError::Malformed("klines response is not an array".to_string()))?;
        let candles = rows.iter().map(parse_kline_row).collect::<Result<Vec<_>, _>>()?;

        debug!(symbol = %pair, timeframe = %timeframe, count = candles.len(), "Fetched klines");
        Ok(candles)
    }

    async fn get_latest_price(&self, symbol: &str) -> Result<f64, MarketDataError> {
        let pair = rest_symbol(symbol);
        let body = self
            .get_json("/api/v3/ticker/price", &[("symbol", pair)])
            .await?;
        let ticker: TickerPrice = serde_json::from_value(body)?;
        parse_price(&ticker.price, "price")
    }
}
