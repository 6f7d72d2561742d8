//! Polling HTTP fetcher with bounded retries and exponential backoff.

use crate::error::PipelineError;
use crate::metrics::Metrics;
use crate::models::candle::Candle;
use crate::services::alphavantage::messages::SeriesResponse;
use crate::services::alphavantage::DEFAULT_BASE_URL;
use crate::services::market_data::{Interval, MarketDataProvider, RetryPolicy};
use crate::services::rate_limit::CallBudget;
use backon::Retryable;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-attempt fetch failures. Transport problems and provider throttling
/// are retryable; a rejected request or an exhausted call budget is not.
#[derive(Debug, Error)]
enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(StatusCode),

    #[error("throttled by provider: {0}")]
    Throttled(String),

    #[error("provider rejected request: {0}")]
    Rejected(String),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("daily call budget exhausted")]
    BudgetExhausted,
}

impl FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) | FetchError::Throttled(_) => true,
            FetchError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            FetchError::Rejected(_) | FetchError::Malformed(_) | FetchError::BudgetExhausted => {
                false
            }
        }
    }
}

pub struct AlphaVantageProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
    call_budget: Option<Arc<CallBudget>>,
    metrics: Option<Arc<Metrics>>,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String, retry: RetryPolicy) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            retry,
            call_budget: None,
            metrics: None,
        }
    }

    /// Point the provider at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_call_budget(mut self, budget: Arc<CallBudget>) -> Self {
        self.call_budget = Some(budget);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// One HTTP attempt: query, status check, payload validation.
    async fn request_series(
        &self,
        symbol: &str,
        currency: &str,
        interval: Interval,
    ) -> Result<Vec<Candle>, FetchError> {
        if let Some(budget) = &self.call_budget {
            if !budget.try_acquire() {
                return Err(FetchError::BudgetExhausted);
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.fetch_attempts_total.inc();
        }

        let url = format!("{}/query", self.base_url);
        let query: Vec<(&str, &str)> = match interval {
            Interval::Hour => vec![
                ("function", "CRYPTO_INTRADAY"),
                ("symbol", symbol),
                ("market", currency),
                ("interval", "60min"),
                ("apikey", &self.api_key),
            ],
            Interval::Day => vec![
                ("function", "DIGITAL_CURRENCY_DAILY"),
                ("symbol", symbol),
                ("market", currency),
                ("apikey", &self.api_key),
            ],
        };

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let payload: SeriesResponse = response.json().await?;

        if let Some(note) = &payload.note {
            return Err(FetchError::Throttled(note.clone()));
        }
        if let Some(message) = &payload.error_message {
            return Err(FetchError::Rejected(message.clone()));
        }

        let series = payload
            .time_series()
            .ok_or_else(|| FetchError::Malformed("no time series in payload".to_string()))?;

        let mut candles = Vec::with_capacity(series.len());
        for (stamp, raw) in &series {
            let Some(timestamp) = parse_timestamp(stamp, interval) else {
                debug!(timestamp = %stamp, "dropping bar with unparsable timestamp");
                continue;
            };
            let Some((open, high, low, close, volume)) = raw.fields() else {
                debug!(timestamp = %stamp, "dropping bar with missing fields");
                continue;
            };
            candles.push(Candle::new(open, high, low, close, volume, timestamp));
        }

        if candles.is_empty() {
            return Err(FetchError::Malformed(
                "time series contained no complete bars".to_string(),
            ));
        }

        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        currency: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, PipelineError> {
        if symbol.trim().is_empty() {
            return Err(PipelineError::DataUnavailable(
                "symbol must be a non-empty ticker".to_string(),
            ));
        }

        let fetch = || self.request_series(symbol, currency, interval);
        let result = fetch
            .retry(self.retry.builder())
            .when(FetchError::is_retryable)
            .notify(|err: &FetchError, delay: Duration| {
                warn!(
                    symbol = %symbol,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "fetch attempt failed, retrying"
                );
            })
            .await;

        match result {
            Ok(mut candles) => {
                if candles.len() > limit {
                    candles = candles.split_off(candles.len() - limit);
                }
                debug!(
                    symbol = %symbol,
                    count = candles.len(),
                    "fetched candle series"
                );
                Ok(candles)
            }
            Err(err) => {
                if let Some(metrics) = &self.metrics {
                    metrics.fetch_failures_total.inc();
                }
                Err(PipelineError::DataUnavailable(format!("{symbol}: {err}")))
            }
        }
    }
}

fn parse_timestamp(stamp: &str, interval: Interval) -> Option<DateTime<Utc>> {
    match interval {
        Interval::Hour => NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc()),
        Interval::Day => NaiveDate::parse_from_str(stamp, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc()),
    }
}
