//! Error taxonomy for the signal pipeline.
//!
//! Per-symbol errors (`PipelineError`) are contained within that symbol's
//! unit of work for a cycle. Only `ConfigError` is allowed to terminate the
//! process, and only before the scheduler loop starts.

use thiserror::Error;

/// Errors raised while evaluating a single symbol in a single cycle.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The fetcher exhausted its retries or the provider returned a payload
    /// we could not use. The symbol is skipped for this cycle.
    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    /// Fewer valid bars than the longest indicator lookback requires.
    #[error("insufficient data: {got} bars, at least {min} required")]
    InsufficientData { got: usize, min: usize },

    /// The notification channel rejected or never received the message.
    /// Never retried; the alert is dropped.
    #[error("notification delivery failed: {0}")]
    NotificationFailure(String),
}

/// Fatal startup errors. Missing required configuration aborts the process
/// before the scheduler loop is entered.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVariable(&'static str),

    #[error("invalid value for {variable}: {reason}")]
    InvalidValue {
        variable: &'static str,
        reason: String,
    },
}
