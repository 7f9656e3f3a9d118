//! Position assignment and crossover detection over indicator rows

use crate::indicators::momentum::macd::MacdPoint;
use crate::models::indicators::{Candle, IndicatorRow, Position};
use crate::models::signal::SignalEdge;

/// Join candles with their MACD points, assigning a position per row and the
/// position delta against the previous row.
pub fn derive_rows(candles: &[Candle], points: &[MacdPoint]) -> Vec<IndicatorRow> {
    let mut rows: Vec<IndicatorRow> = Vec::with_capacity(candles.len().min(points.len()));
    let mut previous: Option<Position> = None;

    for (candle, point) in candles.iter().zip(points) {
        let position = Position::from_lines(point.macd, point.signal_line);
        let signal_delta = previous.map(|prev| position.value() - prev.value());
        previous = Some(position);

        rows.push(IndicatorRow {
            candle: candle.clone(),
            ema_fast: point.ema_fast,
            ema_slow: point.ema_slow,
            macd: point.macd,
            signal_line: point.signal_line,
            histogram: point.histogram,
            position,
            signal_delta,
        });
    }

    rows
}

/// The most recent row and its predecessor (fewer if the window is shorter)
pub fn last_two(rows: &[IndicatorRow]) -> &[IndicatorRow] {
    &rows[rows.len().saturating_sub(2)..]
}

/// Edge fired by the most recent row, if its delta is a full flip.
///
/// Half transitions to or from FLAT (delta of +-1) stay silent.
pub fn detect_transition(rows: &[IndicatorRow]) -> Option<SignalEdge> {
    let tail = last_two(rows);
    let latest = tail.last()?;
    let delta = latest.signal_delta?;
    SignalEdge::from_delta(delta)
}
