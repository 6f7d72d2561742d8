//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// MACD line: EMA(fast) - EMA(slow) on closes.
pub fn calculate_macd(candles: &[Candle], fast_period: usize, slow_period: usize) -> Option<f64> {
    if candles.len() < slow_period {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let fast_ema = math::ema(&closes, fast_period)?;
    let slow_ema = math::ema(&closes, slow_period)?;

    Some(fast_ema - slow_ema)
}
