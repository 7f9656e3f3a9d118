//! EMA (Exponential Moving Average) indicator

use crate::models::indicators::Candle;

/// Smoothing factor for a given period: 2 / (period + 1)
pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period.max(1) as f64 + 1.0)
}

/// Next EMA value from the previous one
pub fn ema_from_previous(value: f64, previous: f64, alpha: f64) -> f64 {
    alpha * value + (1.0 - alpha) * previous
}

/// Full EMA series over `values`, seeded by the first value.
///
/// Output has the same length as the input; an empty input yields an empty
/// series.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = smoothing_factor(period);
    let mut series = Vec::with_capacity(values.len());

    let mut iter = values.iter();
    if let Some(&first) = iter.next() {
        let mut previous = first;
        series.push(first);
        for &value in iter {
            previous = ema_from_previous(value, previous, alpha);
            series.push(previous);
        }
    }

    series
}

/// EMA series of the close prices
pub fn calculate_ema_series(candles: &[Candle], period: usize) -> Vec<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    ema_series(&closes, period)
}
