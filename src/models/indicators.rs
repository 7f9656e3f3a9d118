use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar. `timestamp` is the bar's open time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}

/// Position implied by where MACD sits relative to its signal line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Position {
    Short = -1,
    #[default]
    Flat = 0,
    Long = 1,
}

impl Position {
    /// LONG above the signal line, SHORT below, FLAT when equal or undefined
    pub fn from_lines(macd: f64, signal_line: f64) -> Self {
        if macd > signal_line {
            Position::Long
        } else if macd < signal_line {
            Position::Short
        } else {
            Position::Flat
        }
    }

    pub fn value(self) -> i8 {
        self as i8
    }
}

/// A candle extended with its MACD columns and derived position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub candle: Candle,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd: f64,
    pub signal_line: f64,
    pub histogram: f64,
    pub position: Position,
    /// `position - previous position`; `None` on the first row of a window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_delta: Option<i8>,
}
