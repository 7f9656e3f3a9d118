//! Signal engine: recompute the indicator table for a window and read off the
//! latest crossover.

use crate::config::MacdParams;
use crate::indicators::momentum::macd::calculate_macd_series;
use crate::models::indicators::{Candle, IndicatorRow};
use crate::models::signal::SignalEdge;
use crate::signals::derivation::{derive_rows, detect_transition};

pub struct SignalEngine;

impl SignalEngine {
    /// Full indicator table for the window, recomputed from scratch
    pub fn evaluate(candles: &[Candle], params: &MacdParams) -> Vec<IndicatorRow> {
        let points = calculate_macd_series(candles, params);
        derive_rows(candles, &points)
    }

    /// Edge fired by the last candle of the window, if any
    pub fn latest_edge(candles: &[Candle], params: &MacdParams) -> Option<SignalEdge> {
        let rows = Self::evaluate(candles, params);
        detect_transition(&rows)
    }
}
