use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification-worthy crossover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalEdge {
    /// SHORT -> LONG
    Buy,
    /// LONG -> SHORT
    Sell,
}

impl SignalEdge {
    /// Map a signal delta to an edge; only full flips qualify
    pub fn from_delta(delta: i8) -> Option<Self> {
        match delta {
            2 => Some(SignalEdge::Buy),
            -2 => Some(SignalEdge::Sell),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalEdge::Buy => "buy",
            SignalEdge::Sell => "sell",
        }
    }
}

impl fmt::Display for SignalEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalEdge::Buy => write!(f, "BUY"),
            SignalEdge::Sell => write!(f, "SELL"),
        }
    }
}

/// Entry with its take-profit and stop-loss levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeAlert {
    pub edge: SignalEdge,
    pub entry_price: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
}

impl TradeAlert {
    /// Text delivered to the messaging channel
    pub fn message(&self) -> String {
        match self.edge {
            SignalEdge::Buy => format!(
                "🟢 BUY WITH PRICE {}\nTP: {}\nSL: {}",
                self.entry_price, self.take_profit, self.stop_loss
            ),
            SignalEdge::Sell => format!(
                "🔴SELL WITH PRICE {}\nTP: {}\nSL: {}",
                self.entry_price, self.take_profit, self.stop_loss
            ),
        }
    }
}
