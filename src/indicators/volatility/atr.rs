//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::candle::Candle;

/// Calculate ATR: the arithmetic mean of the true range over the last
/// `period` bars. True range needs the previous close, so the series must
/// hold at least `period + 1` bars.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Option<f64> {
    if candles.len() < period + 1 {
        return None;
    }

    let mut tr_values = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        tr_values.push(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));
    }

    math::sma(&tr_values, period)
}
