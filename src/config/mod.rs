//! Environment-driven configuration.
//!
//! Required variables abort startup with a `ConfigError`; everything else
//! falls back to a documented default. Nothing here is re-read after the
//! scheduler loop starts.

use crate::error::ConfigError;
use crate::services::market_data::{Interval, RetryPolicy};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_SYMBOLS: &str = "BTC,ETH,ADA";
pub const DEFAULT_CYCLE_INTERVAL_SECONDS: u64 = 900;
pub const DEFAULT_SHUTDOWN_GRACE_SECONDS: u64 = 5;
pub const DEFAULT_CANDLE_LIMIT: usize = 100;
pub const DEFAULT_API_CALL_LIMIT: u32 = 50;
pub const DEFAULT_SIGNAL_LOG_PATH: &str = "signals.jsonl";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub chat_id: String,
    pub api_key: String,
    pub market_data_url: Option<String>,
    pub port: u16,
    pub symbols: Vec<String>,
    pub quote_currency: String,
    pub candle_interval: Interval,
    pub candle_limit: usize,
    pub cycle_interval: Duration,
    pub shutdown_grace: Duration,
    pub retry: RetryPolicy,
    pub daily_call_limit: u32,
    pub signal_log_path: PathBuf,
    pub sl_percent: f64,
    pub tp_percent: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let telegram_token = required("TELEGRAM_TOKEN")?;
        let chat_id = required("CHAT_ID")?;
        let api_key = required("ALPHA_VANTAGE_API_KEY")?;

        let symbols: Vec<String> = env::var("SYMBOLS")
            .unwrap_or_else(|_| DEFAULT_SYMBOLS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if symbols.is_empty() {
            return Err(ConfigError::InvalidValue {
                variable: "SYMBOLS",
                reason: "at least one symbol is required".to_string(),
            });
        }

        let candle_interval = match env::var("CANDLE_INTERVAL") {
            Ok(raw) => raw.parse()?,
            Err(_) => Interval::Hour,
        };

        let retry = RetryPolicy {
            max_attempts: parsed("FETCH_MAX_ATTEMPTS", 5)?,
            min_delay: Duration::from_millis(parsed("FETCH_MIN_DELAY_MS", 1000)?),
            backoff_factor: parsed("FETCH_BACKOFF_FACTOR", 2.0)?,
        };
        if retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                variable: "FETCH_MAX_ATTEMPTS",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            telegram_token,
            chat_id,
            api_key,
            market_data_url: env::var("MARKET_DATA_URL").ok(),
            port: parsed("PORT", DEFAULT_PORT)?,
            symbols,
            quote_currency: env::var("QUOTE_CURRENCY").unwrap_or_else(|_| "USD".to_string()),
            candle_interval,
            candle_limit: parsed("CANDLE_LIMIT", DEFAULT_CANDLE_LIMIT)?,
            cycle_interval: Duration::from_secs(parsed(
                "CYCLE_INTERVAL_SECONDS",
                DEFAULT_CYCLE_INTERVAL_SECONDS,
            )?),
            shutdown_grace: Duration::from_secs(parsed(
                "SHUTDOWN_GRACE_SECONDS",
                DEFAULT_SHUTDOWN_GRACE_SECONDS,
            )?),
            retry,
            daily_call_limit: parsed("API_CALL_LIMIT", DEFAULT_API_CALL_LIMIT)?,
            signal_log_path: PathBuf::from(
                env::var("SIGNAL_LOG_PATH").unwrap_or_else(|_| DEFAULT_SIGNAL_LOG_PATH.to_string()),
            ),
            sl_percent: parsed("SL_PERCENT", crate::signals::risk::DEFAULT_SL_PERCENT)?,
            tp_percent: parsed("TP_PERCENT", crate::signals::risk::DEFAULT_TP_PERCENT)?,
        })
    }
}

/// Deployment environment name, used to pick the log format.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn required(variable: &'static str) -> Result<String, ConfigError> {
    match env::var(variable) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable(variable)),
    }
}

fn parsed<T: std::str::FromStr>(variable: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(variable) {
        Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
            variable,
            reason: format!("{e}"),
        }),
        Err(_) => Ok(default),
    }
}
