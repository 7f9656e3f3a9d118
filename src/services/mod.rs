//! External collaborators: market data and the price history window

pub mod binance;
pub mod history;
pub mod market_data;

pub use history::PriceHistory;
pub use market_data::{FeedConnector, KlineEvent, KlineStream, MarketDataProvider};
