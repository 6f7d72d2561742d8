//! Dependency bundle handed to the scheduler's per-symbol tasks.

use crate::db::SignalLog;
use crate::metrics::Metrics;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::Notifier;
use std::sync::Arc;

/// Read-only collaborators of the pipeline. Tasks share this bundle and no
/// other state; the scheduler's SymbolState map stays outside it.
pub struct PipelineContext {
    pub provider: Arc<dyn MarketDataProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub signal_log: Option<Arc<SignalLog>>,
    pub metrics: Option<Arc<Metrics>>,
}

impl PipelineContext {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
        signal_log: Option<Arc<SignalLog>>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self {
            provider,
            notifier,
            signal_log,
            metrics,
        }
    }
}
