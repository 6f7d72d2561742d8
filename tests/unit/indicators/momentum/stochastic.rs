//! Unit tests for the stochastic oscillator

use chrono::{TimeZone, Utc};
use tickerpulse::indicators::momentum::calculate_stochastic;
use tickerpulse::models::candle::Candle;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let ts = Utc.timestamp_opt(i as i64 * 3600, 0).unwrap();
            Candle::new(close, close + 0.5, close - 0.5, close, 1000.0, ts)
        })
        .collect()
}

#[test]
fn test_stochastic_insufficient_data() {
    let candles = candles_from_closes(&[100.0; 15]);
    assert!(calculate_stochastic(&candles, 14, 3).is_none());
}

#[test]
fn test_stochastic_zero_range_is_zero() {
    // highest == lowest must yield %K = 0, not a division error.
    let closes = vec![100.0; 20];
    let candles: Vec<Candle> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let ts = Utc.timestamp_opt(i as i64 * 3600, 0).unwrap();
            Candle::new(close, close, close, close, 1000.0, ts)
        })
        .collect();

    let stoch = calculate_stochastic(&candles, 14, 3).unwrap();
    assert_eq!(stoch.k, 0.0);
    assert_eq!(stoch.d, 0.0);
}

#[test]
fn test_stochastic_rising_series_near_top() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let candles = candles_from_closes(&closes);

    let stoch = calculate_stochastic(&candles, 14, 3).unwrap();
    assert!(stoch.k > 80.0);
    assert!(stoch.d > 80.0);
}

#[test]
fn test_stochastic_falling_series_near_bottom() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
    let candles = candles_from_closes(&closes);

    let stoch = calculate_stochastic(&candles, 14, 3).unwrap();
    assert!(stoch.k < 20.0);
    assert!(stoch.d < 20.0);
}

#[test]
fn test_stochastic_bounded() {
    let closes: Vec<f64> = (0..40)
        .map(|i| 100.0 + (i as f64 * 0.9).sin() * 5.0)
        .collect();
    let candles = candles_from_closes(&closes);

    let stoch = calculate_stochastic(&candles, 14, 3).unwrap();
    assert!((0.0..=100.0).contains(&stoch.k));
    assert!((0.0..=100.0).contains(&stoch.d));
}
