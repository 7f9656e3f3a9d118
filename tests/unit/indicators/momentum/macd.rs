//! Unit tests for the MACD series

use macd_alert::config::MacdParams;
use macd_alert::indicators::momentum::{calculate_macd_default, calculate_macd_series};
use macd_alert::indicators::trend::smoothing_factor;

use crate::common::{candles_from_closes, decline_then_rise};

#[test]
fn test_macd_empty_window() {
    assert!(calculate_macd_default(&[]).is_empty());
}

#[test]
fn test_macd_single_candle() {
    let candles = candles_from_closes(&[7.5]);
    let points = calculate_macd_default(&candles);

    assert_eq!(points.len(), 1);
    let point = points[0];
    assert_eq!(point.ema_fast, 7.5);
    assert_eq!(point.ema_slow, 7.5);
    assert_eq!(point.macd, 0.0);
    assert_eq!(point.signal_line, 0.0);
    assert_eq!(point.histogram, 0.0);
}

#[test]
fn test_macd_short_window_does_not_fail() {
    let candles = candles_from_closes(&[10.0, 10.5, 9.8, 11.2, 10.9]);
    let points = calculate_macd_default(&candles);
    assert_eq!(points.len(), candles.len());
    assert!(points.iter().all(|p| p.macd.is_finite() && p.signal_line.is_finite()));
}

#[test]
fn test_macd_columns_follow_recurrences() {
    let closes = decline_then_rise();
    let candles = candles_from_closes(&closes);
    let params = MacdParams::default();
    let points = calculate_macd_series(&candles, &params);

    let a_fast = smoothing_factor(params.fast);
    let a_slow = smoothing_factor(params.slow);
    let a_signal = smoothing_factor(params.signal);

    assert_eq!(points[0].ema_fast, closes[0]);
    assert_eq!(points[0].ema_slow, closes[0]);
    assert_eq!(points[0].signal_line, points[0].macd);

    for i in 1..points.len() {
        let prev = points[i - 1];
        let p = points[i];
        assert_eq!(p.ema_fast, a_fast * closes[i] + (1.0 - a_fast) * prev.ema_fast);
        assert_eq!(p.ema_slow, a_slow * closes[i] + (1.0 - a_slow) * prev.ema_slow);
        assert_eq!(p.macd, p.ema_fast - p.ema_slow);
        assert_eq!(p.signal_line, a_signal * p.macd + (1.0 - a_signal) * prev.signal_line);
        assert_eq!(p.histogram, p.macd - p.signal_line);
    }
}

#[test]
fn test_macd_is_deterministic() {
    let candles = candles_from_closes(&decline_then_rise());
    let params = MacdParams::new(5, 13, 4).unwrap();
    let first = calculate_macd_series(&candles, &params);
    let second = calculate_macd_series(&candles, &params);
    assert_eq!(first, second);
}

#[test]
fn test_macd_constant_price_converges_to_zero() {
    let candles = candles_from_closes(&[10.0; 120]);
    let points = calculate_macd_default(&candles);
    let last = points.last().unwrap();
    assert!(last.macd.abs() < 1e-9);
    assert!(last.signal_line.abs() < 1e-9);
    assert!(last.histogram.abs() < 1e-9);
}
