//! Environment-driven configuration
//!
//! Every knob has a default except the notifier credentials, which must be
//! provided through `BOT_TOKEN` and `CHAT_ID`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SYMBOL: &str = "icp/usdt";
pub const DEFAULT_TIMEFRAME: &str = "1m";
pub const DEFAULT_WINDOW_SIZE: usize = 100;
pub const DEFAULT_TP_PERCENT: f64 = 0.005;
pub const DEFAULT_SL_PERCENT: f64 = 0.001;

const DEFAULT_BINANCE_REST_URL: &str = "https://api.binance.com";
const DEFAULT_BINANCE_WS_URL: &str = "wss://stream.binance.com:9443";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Get the deployment environment (`APP_ENV`), defaulting to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// MACD periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdParams {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Result<Self, ConfigError> {
        if fast == 0 || slow == 0 || signal == 0 {
            return Err(ConfigError::Invalid {
                key: "MACD periods",
                reason: "periods must be greater than zero".to_string(),
            });
        }
        if fast >= slow {
            return Err(ConfigError::Invalid {
                key: "MACD periods",
                reason: format!("fast period {} must be below slow period {}", fast, slow),
            });
        }
        Ok(Self { fast, slow, signal })
    }
}

/// Where take-profit and stop-loss land relative to the entry price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlacement {
    /// BUY: TP below entry, SL above. SELL: TP above entry, SL below.
    #[default]
    Mirrored,
    /// BUY: TP above entry, SL below. SELL: TP below entry, SL above.
    Directional,
}

impl FromStr for TargetPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mirrored" => Ok(Self::Mirrored),
            "directional" => Ok(Self::Directional),
            other => Err(format!("unknown target placement '{}'", other)),
        }
    }
}

/// Take-profit / stop-loss settings used by the message builder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    pub tp_percent: f64,
    pub sl_percent: f64,
    pub placement: TargetPlacement,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            tp_percent: DEFAULT_TP_PERCENT,
            sl_percent: DEFAULT_SL_PERCENT,
            placement: TargetPlacement::Mirrored,
        }
    }
}

/// Telegram bot credentials and destination chat
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_url: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Exchange endpoints
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub rest_url: String,
    pub ws_url: String,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            rest_url: DEFAULT_BINANCE_REST_URL.to_string(),
            ws_url: DEFAULT_BINANCE_WS_URL.to_string(),
        }
    }
}

/// Timeouts and reconnect pacing for the subscription loop
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub symbol: String,
    pub timeframe: String,
    pub window_size: usize,
    pub macd: MacdParams,
    pub request_timeout: Duration,
    pub feed_idle_timeout: Duration,
    pub reconnect_min_delay: Duration,
    pub reconnect_max_delay: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            timeframe: DEFAULT_TIMEFRAME.to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            macd: MacdParams::default(),
            request_timeout: Duration::from_secs(10),
            feed_idle_timeout: Duration::from_secs(120),
            reconnect_min_delay: Duration::from_millis(500),
            reconnect_max_delay: Duration::from_secs(30),
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub runtime: RuntimeConfig,
    pub alert: AlertConfig,
    pub telegram: TelegramConfig,
    pub exchange: ExchangeConfig,
    pub port: u16,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let macd = MacdParams::new(
            parse_or("MACD_FAST", 12)?,
            parse_or("MACD_SLOW", 26)?,
            parse_or("MACD_SIGNAL", 9)?,
        )?;

        let window_size: usize = parse_or("WINDOW_SIZE", DEFAULT_WINDOW_SIZE)?;
        if window_size == 0 {
            return Err(ConfigError::Invalid {
                key: "WINDOW_SIZE",
                reason: "must be greater than zero".to_string(),
            });
        }

        let alert = AlertConfig {
            tp_percent: percent("TP_PERCENT", DEFAULT_TP_PERCENT)?,
            sl_percent: percent("SL_PERCENT", DEFAULT_SL_PERCENT)?,
            placement: parse_or("TARGET_PLACEMENT", TargetPlacement::Mirrored)?,
        };

        let telegram = TelegramConfig {
            bot_token: required("BOT_TOKEN")?,
            chat_id: required("CHAT_ID")?,
            api_url: string_or("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL),
        };

        let exchange = ExchangeConfig {
            rest_url: string_or("BINANCE_REST_URL", DEFAULT_BINANCE_REST_URL),
            ws_url: string_or("BINANCE_WS_URL", DEFAULT_BINANCE_WS_URL),
        };

        let runtime = RuntimeConfig {
            symbol: string_or("SYMBOL", DEFAULT_SYMBOL),
            timeframe: string_or("TIMEFRAME", DEFAULT_TIMEFRAME),
            window_size,
            macd,
            request_timeout: Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 10)?),
            feed_idle_timeout: Duration::from_secs(parse_or("FEED_IDLE_TIMEOUT_SECS", 120)?),
            reconnect_min_delay: Duration::from_millis(parse_or("RECONNECT_MIN_DELAY_MS", 500)?),
            reconnect_max_delay: Duration::from_secs(parse_or("RECONNECT_MAX_DELAY_SECS", 30)?),
        };

        Ok(Self {
            environment: get_environment(),
            runtime,
            alert,
            telegram,
            exchange,
            port: parse_or("PORT", 8080)?,
        })
    }
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

fn percent(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value: f64 = parse_or(key, default)?;
    if !(0.0..1.0).contains(&value) {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("{} is outside [0, 1)", value),
        });
    }
    Ok(value)
}
