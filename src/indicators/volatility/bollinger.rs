//! Bollinger Bands indicator

use crate::common::math;
use crate::models::candle::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands over the closes.
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
///
/// Band width uses the standard deviation of the closes, applied uniformly
/// across the engine.
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: usize,
    std_dev: f64,
) -> Option<BollingerBands> {
    if candles.len() < period {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma(&closes, period)?;
    let std = math::standard_deviation(&closes, period)?;

    Some(BollingerBands {
        upper: middle + (std_dev * std),
        middle,
        lower: middle - (std_dev * std),
    })
}
