//! Trailing window of closed candles for one symbol/timeframe

use crate::models::indicators::Candle;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct PriceHistory {
    symbol: String,
    timeframe: String,
    capacity: usize,
    candles: VecDeque<Candle>,
}

impl PriceHistory {
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            capacity,
            candles: VecDeque::with_capacity(capacity),
        }
    }

    /// Replace the window with a freshly fetched history.
    ///
    /// Candles opened after `last_closed` (the still-forming bar) are dropped,
    /// duplicate timestamps keep the latest copy, and only the most recent
    /// `capacity` candles are retained.
    pub fn refresh(&mut self, mut fetched: Vec<Candle>, last_closed: DateTime<Utc>) {
        fetched.retain(|c| c.timestamp <= last_closed);
        fetched.sort_by_key(|c| c.timestamp);

        self.candles.clear();
        for candle in fetched {
            if self
                .candles
                .back()
                .is_some_and(|last| last.timestamp == candle.timestamp)
            {
                self.candles.pop_back();
            }
            self.candles.push_back(candle);
        }

        while self.candles.len() > self.capacity {
            self.candles.pop_front();
        }
    }

    /// Make `closed` the newest candle when the fetched history lags behind
    /// the stream.
    ///
    /// Returns `true` if the candle had to be appended. A window that already
    /// ends at or after `closed` is left untouched.
    pub fn complete_with(&mut self, closed: Candle) -> bool {
        if self
            .candles
            .back()
            .is_some_and(|last| last.timestamp >= closed.timestamp)
        {
            return false;
        }

        self.candles.push_back(closed);
        while self.candles.len() > self.capacity {
            self.candles.pop_front();
        }
        true
    }

    /// Candles in chronological order
    pub fn candles(&self) -> Vec<Candle> {
        self.candles.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.back()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }
}
