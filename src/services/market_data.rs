//! Market data provider interface.

use crate::error::{ConfigError, PipelineError};
use crate::models::candle::Candle;
use backon::{BackoffBuilder, ExponentialBuilder};
use std::str::FromStr;
use std::time::Duration;

/// Candle granularity; constrains the remote endpoint selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Hour,
    Day,
}

impl FromStr for Interval {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" | "hourly" | "1h" => Ok(Interval::Hour),
            "day" | "daily" | "1d" => Ok(Interval::Day),
            other => Err(ConfigError::InvalidValue {
                variable: "CANDLE_INTERVAL",
                reason: format!("expected hour or day, got {other:?}"),
            }),
        }
    }
}

/// Bounded-retry policy for the fetcher.
///
/// `max_attempts` counts total attempts (first try included). Delays grow as
/// `min_delay * backoff_factor^n` and are unjittered, so consecutive sleeps
/// are strictly increasing.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub min_delay: Duration,
    pub backoff_factor: f32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            min_delay: Duration::from_secs(1),
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn builder(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_factor(self.backoff_factor)
            .with_max_times(self.max_attempts.saturating_sub(1))
    }

    /// The sleep durations a full retry sequence would use, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        self.builder().build()
    }
}

/// Read access to historical candles.
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the most recent `limit` candles for `symbol` quoted in
    /// `currency`, newest last.
    ///
    /// A fetch that exhausts its retries or yields no usable bars resolves
    /// to `PipelineError::DataUnavailable`; the caller skips the symbol for
    /// the cycle. Results are never cached across cycles.
    async fn fetch_candles(
        &self,
        symbol: &str,
        currency: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, PipelineError>;
}
