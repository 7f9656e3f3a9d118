//! Unit tests for the EMA series

use macd_alert::indicators::trend::{calculate_ema_series, ema_from_previous, ema_series, smoothing_factor};

use crate::common::candles_from_closes;

#[test]
fn test_smoothing_factor() {
    assert_eq!(smoothing_factor(1), 1.0);
    assert_eq!(smoothing_factor(9), 0.2);
    assert_eq!(smoothing_factor(12), 2.0 / 13.0);
}

#[test]
fn test_ema_empty_input() {
    assert!(ema_series(&[], 12).is_empty());
}

#[test]
fn test_ema_seeded_with_first_value() {
    let series = ema_series(&[42.0], 26);
    assert_eq!(series, vec![42.0]);

    let series = ema_series(&[10.0, 20.0, 30.0], 3);
    assert_eq!(series[0], 10.0);
}

#[test]
fn test_ema_recurrence() {
    let values = [10.0, 11.5, 9.25, 12.0, 13.75, 8.0];
    let period = 4;
    let alpha = smoothing_factor(period);
    let series = ema_series(&values, period);

    assert_eq!(series.len(), values.len());
    for i in 1..values.len() {
        let expected = alpha * values[i] + (1.0 - alpha) * series[i - 1];
        assert_eq!(series[i], expected, "row {}", i);
    }
}

#[test]
fn test_ema_from_previous() {
    // alpha 0.5 halves the distance
    assert_eq!(ema_from_previous(20.0, 10.0, 0.5), 15.0);
}

#[test]
fn test_ema_series_uses_closes() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0]);
    let from_candles = calculate_ema_series(&candles, 3);
    let from_values = ema_series(&[1.0, 2.0, 3.0, 4.0], 3);
    assert_eq!(from_candles, from_values);
}
