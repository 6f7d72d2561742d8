//! Stop-loss / take-profit levels around an entry price.

use crate::models::signal::RiskLevels;
use thiserror::Error;

pub const DEFAULT_SL_PERCENT: f64 = 0.02;
pub const DEFAULT_TP_PERCENT: f64 = 0.05;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("entry price must be positive, got {0}")]
    NonPositiveEntry(f64),
}

/// Derive stop-loss and take-profit prices from an entry price.
///
/// `stop_loss = entry * (1 - sl_percent)`, `take_profit = entry * (1 + tp_percent)`.
pub fn annotate(entry_price: f64, sl_percent: f64, tp_percent: f64) -> Result<RiskLevels, RiskError> {
    if entry_price <= 0.0 {
        return Err(RiskError::NonPositiveEntry(entry_price));
    }

    Ok(RiskLevels {
        stop_loss: entry_price * (1.0 - sl_percent),
        take_profit: entry_price * (1.0 + tp_percent),
    })
}
