use serde::{Deserialize, Serialize};

/// Snapshot of every indicator derived from one candle series.
///
/// Only valid for the series it was computed from; recomputed fresh every
/// cycle and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma_short: f64,
    pub sma_long: f64,
    pub ema_short: f64,
    pub ema_long: f64,
    pub macd: f64,
    pub atr: f64,
    pub upper_band: f64,
    pub lower_band: f64,
    pub rsi: f64,
    pub stochastic_k: f64,
    pub stochastic_d: f64,
}
