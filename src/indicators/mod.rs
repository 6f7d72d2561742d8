//! Technical indicator computation.
//!
//! Each submodule holds the per-family indicator functions; the
//! [`IndicatorEngine`] reduces a candle series to the full [`IndicatorSet`]
//! snapshot with the canonical window set (SMA 10/20, EMA 12/26, ATR 14,
//! Bollinger 20 +/- 2 sigma, RSI 14, Stochastic 14/3).

pub mod momentum;
pub mod trend;
pub mod volatility;

use crate::error::PipelineError;
use crate::models::candle::Candle;
use crate::models::indicators::IndicatorSet;

/// Longest indicator lookback; a series shorter than this is unusable.
pub const MIN_CANDLES: usize = 26;

pub const SMA_SHORT_PERIOD: usize = 10;
pub const SMA_LONG_PERIOD: usize = 20;
pub const EMA_SHORT_PERIOD: usize = 12;
pub const EMA_LONG_PERIOD: usize = 26;
pub const ATR_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;
pub const RSI_PERIOD: usize = 14;
pub const STOCHASTIC_K_PERIOD: usize = 14;
pub const STOCHASTIC_D_PERIOD: usize = 3;

pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Compute the full indicator snapshot for one candle series.
    ///
    /// Fails with `InsufficientData` when fewer than [`MIN_CANDLES`] bars
    /// are available; every individual indicator is guaranteed to resolve
    /// beyond that threshold.
    pub fn compute(candles: &[Candle]) -> Result<IndicatorSet, PipelineError> {
        if candles.len() < MIN_CANDLES {
            return Err(PipelineError::InsufficientData {
                got: candles.len(),
                min: MIN_CANDLES,
            });
        }

        let insufficient = || PipelineError::InsufficientData {
            got: candles.len(),
            min: MIN_CANDLES,
        };

        let sma_short =
            trend::calculate_sma(candles, SMA_SHORT_PERIOD).ok_or_else(insufficient)?;
        let sma_long = trend::calculate_sma(candles, SMA_LONG_PERIOD).ok_or_else(insufficient)?;
        let ema_short =
            trend::calculate_ema(candles, EMA_SHORT_PERIOD).ok_or_else(insufficient)?;
        let ema_long = trend::calculate_ema(candles, EMA_LONG_PERIOD).ok_or_else(insufficient)?;
        let macd =
            momentum::calculate_macd(candles, EMA_SHORT_PERIOD, EMA_LONG_PERIOD)
                .ok_or_else(insufficient)?;
        let atr = volatility::calculate_atr(candles, ATR_PERIOD).ok_or_else(insufficient)?;
        let bands =
            volatility::calculate_bollinger_bands(candles, BOLLINGER_PERIOD, BOLLINGER_STD_DEV)
                .ok_or_else(insufficient)?;
        let rsi = momentum::calculate_rsi(candles, RSI_PERIOD).ok_or_else(insufficient)?;
        let stochastic =
            momentum::calculate_stochastic(candles, STOCHASTIC_K_PERIOD, STOCHASTIC_D_PERIOD)
                .ok_or_else(insufficient)?;

        Ok(IndicatorSet {
            sma_short,
            sma_long,
            ema_short,
            ema_long,
            macd,
            atr,
            upper_band: bands.upper,
            lower_band: bands.lower,
            rsi,
            stochastic_k: stochastic.k,
            stochastic_d: stochastic.d,
        })
    }
}
