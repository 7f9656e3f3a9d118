//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{Candle, IndicatorRow, Position};
pub use signal::{SignalEdge, TradeAlert};
