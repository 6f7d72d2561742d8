//! Threshold/crossover rules reducing an indicator snapshot to a decision.

use crate::models::indicators::IndicatorSet;
use crate::models::signal::Signal;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const STOCHASTIC_OVERSOLD: f64 = 20.0;
pub const STOCHASTIC_OVERBOUGHT: f64 = 80.0;

/// Map an indicator snapshot to a trading decision.
///
/// Rules are evaluated in priority order, first match wins; oversold and
/// overbought extremes outrank the momentum crossovers:
///
/// 1. RSI < 30 and %K < 20 -> BUY (oversold)
/// 2. RSI > 70 and %K > 80 -> SELL (overbought)
/// 3. MACD > 0 and EMA_short > EMA_long -> BUY (bullish momentum)
/// 4. MACD < 0 and EMA_short < EMA_long -> SELL (bearish momentum)
/// 5. otherwise HOLD
///
/// Pure and total: always returns exactly one decision, never fails.
pub fn classify(indicators: &IndicatorSet) -> Signal {
    if indicators.rsi < RSI_OVERSOLD && indicators.stochastic_k < STOCHASTIC_OVERSOLD {
        return Signal::Buy;
    }
    if indicators.rsi > RSI_OVERBOUGHT && indicators.stochastic_k > STOCHASTIC_OVERBOUGHT {
        return Signal::Sell;
    }
    if indicators.macd > 0.0 && indicators.ema_short > indicators.ema_long {
        return Signal::Buy;
    }
    if indicators.macd < 0.0 && indicators.ema_short < indicators.ema_long {
        return Signal::Sell;
    }
    Signal::Hold
}
