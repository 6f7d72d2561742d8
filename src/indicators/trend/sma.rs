//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// Arithmetic mean of the last `period` closes.
pub fn calculate_sma(candles: &[Candle], period: usize) -> Option<f64> {
    if candles.len() < period {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::sma(&closes, period)
}
