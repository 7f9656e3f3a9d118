//! MACD (Moving Average Convergence Divergence) indicator

use crate::config::MacdParams;
use crate::indicators::trend::ema::{calculate_ema_series, ema_series};
use crate::models::indicators::Candle;
use serde::{Deserialize, Serialize};

/// MACD columns for a single candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

/// Calculate the MACD series, one point per candle
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Every EMA is seeded with the first value of its input, so short windows
/// still produce a (less converged) point for each candle.
pub fn calculate_macd_series(candles: &[Candle], params: &MacdParams) -> Vec<MacdPoint> {
    let fast = calculate_ema_series(candles, params.fast);
    let slow = calculate_ema_series(candles, params.slow);

    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_series(&macd, params.signal);

    fast.into_iter()
        .zip(slow)
        .zip(macd)
        .zip(signal)
        .map(|(((ema_fast, ema_slow), macd), signal_line)| MacdPoint {
            ema_fast,
            ema_slow,
            macd,
            signal_line,
            histogram: macd - signal_line,
        })
        .collect()
}

/// Calculate the MACD series with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Vec<MacdPoint> {
    calculate_macd_series(candles, &MacdParams::default())
}
