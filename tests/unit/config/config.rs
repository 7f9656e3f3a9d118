//! Unit tests for configuration parsing

use macd_alert::config::{Config, MacdParams, TargetPlacement};
use macd_alert::error::ConfigError;
use std::env;
use std::time::Duration;

const KEYS: &[&str] = &[
    "BOT_TOKEN",
    "CHAT_ID",
    "SYMBOL",
    "TIMEFRAME",
    "WINDOW_SIZE",
    "MACD_FAST",
    "MACD_SLOW",
    "MACD_SIGNAL",
    "TP_PERCENT",
    "SL_PERCENT",
    "TARGET_PLACEMENT",
    "REQUEST_TIMEOUT_SECS",
    "PORT",
];

fn clear_env() {
    for key in KEYS {
        env::remove_var(key);
    }
}

#[test]
fn test_macd_params_validation() {
    assert_eq!(MacdParams::default(), MacdParams::new(12, 26, 9).unwrap());
    assert!(MacdParams::new(0, 26, 9).is_err());
    assert!(MacdParams::new(12, 26, 0).is_err());
    assert!(MacdParams::new(26, 12, 9).is_err());
}

#[test]
fn test_target_placement_parsing() {
    assert_eq!("mirrored".parse::<TargetPlacement>(), Ok(TargetPlacement::Mirrored));
    assert_eq!(" Directional ".parse::<TargetPlacement>(), Ok(TargetPlacement::Directional));
    assert!("sideways".parse::<TargetPlacement>().is_err());
    assert_eq!(TargetPlacement::default(), TargetPlacement::Mirrored);
}

// Environment is process-global, so every from_env case lives in one test
#[test]
fn test_config_from_env() {
    clear_env();
    assert!(matches!(Config::from_env(), Err(ConfigError::Missing("BOT_TOKEN"))));

    env::set_var("BOT_TOKEN", "123:abc");
    assert!(matches!(Config::from_env(), Err(ConfigError::Missing("CHAT_ID"))));

    env::set_var("CHAT_ID", "-100200");
    let config = Config::from_env().unwrap();
    assert_eq!(config.runtime.symbol, "icp/usdt");
    assert_eq!(config.runtime.timeframe, "1m");
    assert_eq!(config.runtime.window_size, 100);
    assert_eq!(config.runtime.macd, MacdParams::default());
    assert_eq!(config.alert.tp_percent, 0.005);
    assert_eq!(config.alert.sl_percent, 0.001);
    assert_eq!(config.alert.placement, TargetPlacement::Mirrored);
    assert_eq!(config.runtime.request_timeout, Duration::from_secs(10));
    assert_eq!(config.telegram.chat_id, "-100200");
    assert_eq!(config.port, 8080);
    assert!(!format!("{:?}", config.telegram).contains("123:abc"));

    env::set_var("SYMBOL", "btc/usdt");
    env::set_var("TIMEFRAME", "5m");
    env::set_var("WINDOW_SIZE", "250");
    env::set_var("MACD_FAST", "8");
    env::set_var("MACD_SLOW", "21");
    env::set_var("MACD_SIGNAL", "5");
    env::set_var("TP_PERCENT", "0.01");
    env::set_var("TARGET_PLACEMENT", "directional");
    env::set_var("PORT", "9090");
    let config = Config::from_env().unwrap();
    assert_eq!(config.runtime.symbol, "btc/usdt");
    assert_eq!(config.runtime.timeframe, "5m");
    assert_eq!(config.runtime.window_size, 250);
    assert_eq!(config.runtime.macd, MacdParams::new(8, 21, 5).unwrap());
    assert_eq!(config.alert.tp_percent, 0.01);
    assert_eq!(config.alert.placement, TargetPlacement::Directional);
    assert_eq!(config.port, 9090);

    env::set_var("WINDOW_SIZE", "0");
    assert!(matches!(Config::from_env(), Err(ConfigError::Invalid { key: "WINDOW_SIZE", .. })));
    env::set_var("WINDOW_SIZE", "many");
    assert!(matches!(Config::from_env(), Err(ConfigError::Invalid { key: "WINDOW_SIZE", .. })));
    env::remove_var("WINDOW_SIZE");

    env::set_var("SL_PERCENT", "1.5");
    assert!(matches!(Config::from_env(), Err(ConfigError::Invalid { key: "SL_PERCENT", .. })));
    env::remove_var("SL_PERCENT");

    env::set_var("MACD_FAST", "30");
    assert!(Config::from_env().is_err());

    clear_env();
}
