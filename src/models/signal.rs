use crate::models::indicators::IndicatorSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trading decision for one symbol in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// Stop-loss and take-profit prices derived from the entry price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// An emitted signal: the decision plus the indicator snapshot and entry
/// price that produced it. One row of the signal log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub symbol: String,
    pub signal: Signal,
    pub entry_price: f64,
    pub indicators: IndicatorSet,
    pub risk: RiskLevels,
    pub timestamp: DateTime<Utc>,
}
