//! Take-profit / stop-loss levels for a fired edge

use crate::config::{AlertConfig, TargetPlacement};
use crate::models::signal::{SignalEdge, TradeAlert};

/// Build the alert for `edge` around `entry_price`.
///
/// Returns `None` when the price is absent or not a finite positive number, so
/// a failed price lookup never reaches message formatting.
pub fn build_alert(
    edge: SignalEdge,
    entry_price: Option<f64>,
    config: &AlertConfig,
) -> Option<TradeAlert> {
    let entry = entry_price.filter(|p| p.is_finite() && *p > 0.0)?;

    let tp_up = entry * (1.0 + config.tp_percent);
    let tp_down = entry * (1.0 - config.tp_percent);
    let sl_up = entry * (1.0 + config.sl_percent);
    let sl_down = entry * (1.0 - config.sl_percent);

    let (take_profit, stop_loss) = match (config.placement, edge) {
        (TargetPlacement::Mirrored, SignalEdge::Buy) => (tp_down, sl_up),
        (TargetPlacement::Mirrored, SignalEdge::Sell) => (tp_up, sl_down),
        (TargetPlacement::Directional, SignalEdge::Buy) => (tp_up, sl_down),
        (TargetPlacement::Directional, SignalEdge::Sell) => (tp_down, sl_up),
    };

    Some(TradeAlert {
        edge,
        entry_price: entry,
        take_profit,
        stop_loss,
    })
}
