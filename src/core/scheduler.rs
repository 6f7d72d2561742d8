//! Fixed-interval scheduler driving the per-symbol signal pipeline.
//!
//! Every cycle spawns one task per tracked symbol
//! (fetch -> compute -> classify -> annotate -> notify) into a `JoinSet`.
//! The loop is the only writer of the per-symbol state map, which remembers
//! the last classified signal purely for de-duplication. Per-symbol errors
//! are logged and contained; one symbol's failure never aborts the cycle
//! for the others.

use crate::core::context::PipelineContext;
use crate::error::PipelineError;
use crate::indicators::IndicatorEngine;
use crate::models::signal::{Signal, SignalEvent};
use crate::services::market_data::Interval;
use crate::signals::{annotate, classify, format_signal_message, risk};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub symbols: Vec<String>,
    pub quote_currency: String,
    pub candle_interval: Interval,
    pub candle_limit: usize,
    pub cycle_interval: Duration,
    pub shutdown_grace: Duration,
    pub sl_percent: f64,
    pub tp_percent: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["BTC".to_string()],
            quote_currency: "USD".to_string(),
            candle_interval: Interval::Hour,
            candle_limit: 100,
            cycle_interval: Duration::from_secs(900),
            shutdown_grace: Duration::from_secs(5),
            sl_percent: risk::DEFAULT_SL_PERCENT,
            tp_percent: risk::DEFAULT_TP_PERCENT,
        }
    }
}

pub struct SignalScheduler {
    config: SchedulerConfig,
    context: Arc<PipelineContext>,
    last_signals: HashMap<String, Signal>,
}

impl SignalScheduler {
    pub fn new(config: SchedulerConfig, context: Arc<PipelineContext>) -> Self {
        Self {
            config,
            context,
            last_signals: HashMap::new(),
        }
    }

    /// The last signal recorded for a symbol, if any cycle produced one.
    pub fn last_signal(&self, symbol: &str) -> Option<Signal> {
        self.last_signals.get(symbol).copied()
    }

    /// Run cycles until a shutdown is signalled. The first cycle starts
    /// immediately; in-flight symbol work gets `shutdown_grace` to finish
    /// before it is cancelled.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.cycle_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            symbols = ?self.config.symbols,
            interval_secs = self.config.cycle_interval.as_secs(),
            "scheduler started"
        );

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {}
            }

            let grace = self.config.shutdown_grace;
            let cycle = self.run_cycle();
            tokio::pin!(cycle);

            tokio::select! {
                _ = &mut cycle => {}
                _ = shutdown.changed() => {
                    info!(grace_secs = grace.as_secs(), "shutdown requested mid-cycle");
                    if tokio::time::timeout(grace, &mut cycle).await.is_err() {
                        warn!("grace period elapsed, cancelling in-flight symbol work");
                    }
                    break;
                }
            }
        }

        info!("scheduler stopped");
    }

    /// One pass over every tracked symbol. Public so tests can drive cycles
    /// without the interval loop.
    pub async fn run_cycle(&mut self) {
        let mut tasks = JoinSet::new();

        for symbol in &self.config.symbols {
            let context = self.context.clone();
            let config = self.config.clone();
            let symbol = symbol.clone();
            let last = self.last_signals.get(&symbol).copied();

            tasks.spawn(async move {
                let outcome = evaluate_symbol(context, config, &symbol, last).await;
                (symbol, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((symbol, Ok(signal))) => {
                    self.last_signals.insert(symbol, signal);
                }
                Ok((symbol, Err(err))) => {
                    warn!(symbol = %symbol, error = %err, "symbol skipped this cycle");
                    if let Some(metrics) = &self.context.metrics {
                        metrics.symbols_skipped_total.inc();
                    }
                }
                Err(join_err) => {
                    if !join_err.is_cancelled() {
                        error!(error = %join_err, "symbol task panicked");
                    }
                }
            }
        }

        if let Some(metrics) = &self.context.metrics {
            metrics.cycles_total.inc();
        }
    }
}

/// Full pipeline for one symbol: fetch, compute, classify, and - when the
/// signal changed since the previous cycle - annotate risk, log and notify.
/// Returns the classified signal so the loop can update its state map.
async fn evaluate_symbol(
    context: Arc<PipelineContext>,
    config: SchedulerConfig,
    symbol: &str,
    last: Option<Signal>,
) -> Result<Signal, PipelineError> {
    let candles = context
        .provider
        .fetch_candles(
            symbol,
            &config.quote_currency,
            config.candle_interval,
            config.candle_limit,
        )
        .await?;

    let indicators = IndicatorEngine::compute(&candles)?;
    let entry_price = candles.last().map(|c| c.close).unwrap_or_default();
    let signal = classify(&indicators);

    if last == Some(signal) {
        debug!(symbol = %symbol, signal = %signal, "signal unchanged, notification suppressed");
        return Ok(signal);
    }

    let risk_levels = annotate(entry_price, config.sl_percent, config.tp_percent)
        .map_err(|e| PipelineError::DataUnavailable(e.to_string()))?;

    let event = SignalEvent {
        symbol: symbol.to_string(),
        signal,
        entry_price,
        indicators,
        risk: risk_levels,
        timestamp: Utc::now(),
    };

    if let Some(log) = &context.signal_log {
        if let Err(e) = log.append(&event).await {
            warn!(symbol = %symbol, error = %e, "failed to append to signal log");
        }
    }

    if let Some(metrics) = &context.metrics {
        metrics.signals_emitted_total.inc();
    }

    let message = format_signal_message(&event);
    match context.notifier.notify(&message).await {
        Ok(()) => {
            info!(symbol = %symbol, signal = %signal, price = entry_price, "signal notification delivered");
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "notification dropped, not retried");
            if let Some(metrics) = &context.metrics {
                metrics.notifications_failed_total.inc();
            }
        }
    }

    Ok(signal)
}
