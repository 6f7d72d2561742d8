//! Momentum oscillators.

mod macd;
mod rsi;
mod stochastic;

pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use stochastic::{calculate_stochastic, StochasticIndicator};
