//! MACD crossover alerts for a single trading pair.
//!
//! A kline stream drives a recompute-from-window MACD table; full crossovers
//! on a closed candle are turned into BUY/SELL messages with take-profit and
//! stop-loss levels and delivered through a notifier.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod services;
pub mod signals;
