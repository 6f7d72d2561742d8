//! Unit tests for the signal classifier

use tickerpulse::models::indicators::IndicatorSet;
use tickerpulse::models::signal::Signal;
use tickerpulse::signals::classify;

/// Neutral snapshot that matches no rule: mid-range oscillators, flat
/// moving averages, zero MACD.
fn neutral_set() -> IndicatorSet {
    IndicatorSet {
        sma_short: 100.0,
        sma_long: 100.0,
        ema_short: 100.0,
        ema_long: 100.0,
        macd: 0.0,
        atr: 1.0,
        upper_band: 102.0,
        lower_band: 98.0,
        rsi: 50.0,
        stochastic_k: 50.0,
        stochastic_d: 50.0,
    }
}

#[test]
fn test_neutral_set_holds() {
    assert_eq!(classify(&neutral_set()), Signal::Hold);
}

#[test]
fn test_oversold_buys() {
    let mut set = neutral_set();
    set.rsi = 25.0;
    set.stochastic_k = 10.0;
    assert_eq!(classify(&set), Signal::Buy);
}

#[test]
fn test_overbought_sells() {
    let mut set = neutral_set();
    set.rsi = 75.0;
    set.stochastic_k = 90.0;
    assert_eq!(classify(&set), Signal::Sell);
}

#[test]
fn test_bullish_momentum_buys() {
    let mut set = neutral_set();
    set.macd = 0.8;
    set.ema_short = 101.0;
    set.ema_long = 100.0;
    assert_eq!(classify(&set), Signal::Buy);
}

#[test]
fn test_bearish_momentum_sells() {
    let mut set = neutral_set();
    set.macd = -0.8;
    set.ema_short = 99.0;
    set.ema_long = 100.0;
    assert_eq!(classify(&set), Signal::Sell);
}

#[test]
fn test_oversold_outranks_bearish_momentum() {
    // Rules 1 and 4 both match; rule 1 wins.
    let mut set = neutral_set();
    set.rsi = 25.0;
    set.stochastic_k = 10.0;
    set.macd = -0.8;
    set.ema_short = 99.0;
    set.ema_long = 100.0;
    assert_eq!(classify(&set), Signal::Buy);
}

#[test]
fn test_overbought_outranks_bullish_momentum() {
    let mut set = neutral_set();
    set.rsi = 75.0;
    set.stochastic_k = 90.0;
    set.macd = 0.8;
    set.ema_short = 101.0;
    set.ema_long = 100.0;
    assert_eq!(classify(&set), Signal::Sell);
}

#[test]
fn test_oversold_requires_both_oscillators() {
    // RSI alone is not enough for rule 1; with a flat MACD this holds.
    let mut set = neutral_set();
    set.rsi = 25.0;
    set.stochastic_k = 50.0;
    assert_eq!(classify(&set), Signal::Hold);
}

#[test]
fn test_mixed_momentum_holds() {
    // MACD positive but EMAs inverted: neither momentum rule matches.
    let mut set = neutral_set();
    set.macd = 0.5;
    set.ema_short = 99.0;
    set.ema_long = 100.0;
    assert_eq!(classify(&set), Signal::Hold);
}

#[test]
fn test_classify_is_deterministic() {
    let set = neutral_set();
    assert_eq!(classify(&set), classify(&set));
}
