//! Binance wire formats

use crate::error::MarketDataError;
use crate::models::indicators::Candle;
use crate::services::market_data::KlineEvent;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// `<symbol>@kline_<interval>` stream payload
#[derive(Debug, Clone, Deserialize)]
pub struct KlineMessage {
    #[serde(rename = "e")]
    pub event_type: String,
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "k")]
    pub kline: KlinePayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KlinePayload {
    #[serde(rename = "t")]
    pub open_time: i64,
    #[serde(rename = "T")]
    pub close_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "i")]
    pub interval: String,
    #[serde(rename = "o")]
    pub open: String,
    #[serde(rename = "c")]
    pub close: String,
    #[serde(rename = "h")]
    pub high: String,
    #[serde(rename = "l")]
    pub low: String,
    #[serde(rename = "v")]
    pub volume: String,
    #[serde(rename = "x")]
    pub is_closed: bool,
}

/// `GET /api/v3/ticker/price` response
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

impl TryFrom<KlineMessage> for KlineEvent {
    type Error = MarketDataError;

    fn try_from(msg: KlineMessage) -> Result<Self, Self::Error> {
        let k = msg.kline;
        Ok(KlineEvent {
            open_time: millis_to_datetime(k.open_time)?,
            close_time: millis_to_datetime(k.close_time)?,
            open: parse_price(&k.open, "open")?,
            high: parse_price(&k.high, "high")?,
            low: parse_price(&k.low, "low")?,
            close: parse_price(&k.close, "close")?,
            volume: parse_price(&k.volume, "volume")?,
            is_closed: k.is_closed,
            symbol: k.symbol,
            interval: k.interval,
        })
    }
}

/// Decode a raw stream frame into a kline event
pub fn parse_kline_event(text: &str) -> Result<KlineEvent, MarketDataError> {
    let msg: KlineMessage = serde_json::from_str(text)?;
    if msg.event_type != "kline" {
        return Err(MarketDataError::Malformed(format!(
            "unexpected event type '{}'",
            msg.event_type
        )));
    }
    msg.try_into()
}

/// Decode one row of `GET /api/v3/klines`:
/// `[open_time, open, high, low, close, volume, close_time, ...]`
pub fn parse_kline_row(row: &Value) -> Result<Candle, MarketDataError> {
    let fields = row
        .as_array()
        .ok_or_else(|| MarketDataError::Malformed("kline row is not an array".to_string()))?;
    if fields.len() < 6 {
        return Err(MarketDataError::Malformed(format!(
            "kline row has {} fields, expected at least 6",
            fields.len()
        )));
    }

    let open_time = fields[0]
        .as_i64()
        .ok_or_else(|| MarketDataError::Malformed("kline open time is not an integer".to_string()))?;

    Ok(Candle::new(
        value_to_f64(&fields[1], "open")?,
        value_to_f64(&fields[2], "high")?,
        value_to_f64(&fields[3], "low")?,
        value_to_f64(&fields[4], "close")?,
        value_to_f64(&fields[5], "volume")?,
        millis_to_datetime(open_time)?,
    ))
}

pub fn parse_price(raw: &str, field: &str) -> Result<f64, MarketDataError> {
    raw.parse::<f64>()
        .map_err(|e| MarketDataError::Malformed(format!("invalid {} '{}': {}", field, raw, e)))
}

fn value_to_f64(value: &Value, field: &str) -> Result<f64, MarketDataError> {
    match value {
        Value::String(s) => parse_price(s, field),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| MarketDataError::Malformed(format!("invalid {}", field))),
        _ => Err(MarketDataError::Malformed(format!("invalid {}", field))),
    }
}

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, MarketDataError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| MarketDataError::Malformed(format!("timestamp {} out of range", millis)))
}

/// `icp/usdt` -> `ICPUSDT`
pub fn rest_symbol(symbol: &str) -> String {
    symbol.replace(['/', '-'], "").to_uppercase()
}

/// `icp/usdt` -> `icpusdt`
pub fn stream_symbol(symbol: &str) -> String {
    symbol.replace(['/', '-'], "").to_lowercase()
}
