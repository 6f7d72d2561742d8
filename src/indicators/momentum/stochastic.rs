//! Stochastic oscillator (%K / %D)

use crate::common::math;
use crate::models::candle::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticIndicator {
    pub k: f64,
    pub d: f64,
}

/// Calculate %K and %D.
///
/// %K = (close - lowest_low) / (highest_high - lowest_low) * 100 over the
/// trailing `k_period` bars; %D is the `d_period` SMA of %K. A zero-range
/// window (highest == lowest) yields %K = 0.
pub fn calculate_stochastic(
    candles: &[Candle],
    k_period: usize,
    d_period: usize,
) -> Option<StochasticIndicator> {
    if k_period == 0 || d_period == 0 || candles.len() < k_period + d_period - 1 {
        return None;
    }

    let mut k_values = Vec::with_capacity(d_period);
    for offset in (0..d_period).rev() {
        let end = candles.len() - offset;
        k_values.push(percent_k(&candles[..end], k_period)?);
    }

    let k = *k_values.last()?;
    let d = math::sma(&k_values, d_period)?;

    Some(StochasticIndicator { k, d })
}

fn percent_k(candles: &[Candle], period: usize) -> Option<f64> {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    let highest_high = math::highest(&highs, period)?;
    let lowest_low = math::lowest(&lows, period)?;
    let close = candles.last()?.close;

    let range = highest_high - lowest_low;
    if range == 0.0 {
        return Some(0.0);
    }

    Some((close - lowest_low) / range * 100.0)
}
