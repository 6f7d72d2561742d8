//! Alpha Vantage market data provider implementation.

mod messages;
mod provider;

pub use provider::AlphaVantageProvider;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
