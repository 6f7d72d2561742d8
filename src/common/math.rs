//! Moving averages and range math shared by the indicator modules.

/// Simple moving average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Exponential moving average with smoothing factor `2 / (period + 1)`.
///
/// Seeded from the SMA of the first `period` values, then updated with the
/// standard recurrence over the remainder of the series.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let mut ema = values[..period].iter().sum::<f64>() / period as f64;
    for &value in &values[period..] {
        ema = ema_from_previous(value, ema, period);
    }
    Some(ema)
}

/// One EMA recurrence step: `(price - prev) * k + prev`.
pub fn ema_from_previous(price: f64, previous: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    (price - previous) * k + previous
}

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Population standard deviation of the last `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / period as f64;
    Some(variance.sqrt())
}

/// Highest value among the last `period` entries.
pub fn highest(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    values[values.len() - period..]
        .iter()
        .copied()
        .fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        })
}

/// Lowest value among the last `period` entries.
pub fn lowest(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    values[values.len() - period..]
        .iter()
        .copied()
        .fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.min(v)))
        })
}
