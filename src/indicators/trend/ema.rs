//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// Calculate EMA of the closes for a specific period.
///
/// Seeded from the SMA of the first `period` closes, then updated with the
/// `2 / (period + 1)` smoothing recurrence over the rest of the series.
pub fn calculate_ema(candles: &[Candle], period: usize) -> Option<f64> {
    if candles.len() < period {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema(&closes, period)
}
