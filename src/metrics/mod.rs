//! Prometheus counters for the signal pipeline.

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub fetch_attempts_total: IntCounter,
    pub fetch_failures_total: IntCounter,
    pub cycles_total: IntCounter,
    pub signals_emitted_total: IntCounter,
    pub notifications_failed_total: IntCounter,
    pub symbols_skipped_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let fetch_attempts_total = IntCounter::new(
            "fetch_attempts_total",
            "Market data HTTP attempts, retries included",
        )?;
        let fetch_failures_total = IntCounter::new(
            "fetch_failures_total",
            "Fetches that exhausted their retries",
        )?;
        let cycles_total = IntCounter::new("cycles_total", "Completed scheduler cycles")?;
        let signals_emitted_total = IntCounter::new(
            "signals_emitted_total",
            "Signals that passed de-duplication and were emitted",
        )?;
        let notifications_failed_total = IntCounter::new(
            "notifications_failed_total",
            "Notification deliveries that failed and were dropped",
        )?;
        let symbols_skipped_total = IntCounter::new(
            "symbols_skipped_total",
            "Per-symbol evaluations skipped due to pipeline errors",
        )?;

        registry.register(Box::new(fetch_attempts_total.clone()))?;
        registry.register(Box::new(fetch_failures_total.clone()))?;
        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(notifications_failed_total.clone()))?;
        registry.register(Box::new(symbols_skipped_total.clone()))?;

        Ok(Self {
            registry,
            fetch_attempts_total,
            fetch_failures_total,
            cycles_total,
            signals_emitted_total,
            notifications_failed_total,
            symbols_skipped_total,
        })
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
