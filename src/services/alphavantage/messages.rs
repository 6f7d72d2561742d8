//! Wire types for the Alpha Vantage crypto endpoints.

use serde::Deserialize;
use std::collections::HashMap;

/// Top-level response shape shared by CRYPTO_INTRADAY and
/// DIGITAL_CURRENCY_DAILY. The series member's key varies
/// ("Time Series Crypto (60min)", "Time Series (Digital Currency Daily)"),
/// so everything not recognized is captured by the flatten map and the
/// series is located by key prefix.
#[derive(Debug, Deserialize)]
pub struct SeriesResponse {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,

    /// Present when the provider throttles the API key.
    #[serde(rename = "Note")]
    pub note: Option<String>,

    #[serde(flatten)]
    pub sections: HashMap<String, serde_json::Value>,
}

impl SeriesResponse {
    /// The timestamp -> bar map, wherever the provider put it.
    pub fn time_series(&self) -> Option<HashMap<String, RawBar>> {
        let value = self
            .sections
            .iter()
            .find(|(key, _)| key.starts_with("Time Series"))
            .map(|(_, value)| value)?;
        serde_json::from_value(value.clone()).ok()
    }
}

/// One bar as the provider encodes it: numbered keys, string values. Fields
/// are optional so a partial bar deserializes and can be dropped instead of
/// failing the whole payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBar {
    #[serde(rename = "1. open")]
    pub open: Option<String>,
    #[serde(rename = "2. high")]
    pub high: Option<String>,
    #[serde(rename = "3. low")]
    pub low: Option<String>,
    #[serde(rename = "4. close")]
    pub close: Option<String>,
    #[serde(rename = "5. volume")]
    pub volume: Option<String>,
}

impl RawBar {
    /// All five fields present and numeric, or nothing.
    pub fn fields(&self) -> Option<(f64, f64, f64, f64, f64)> {
        let open = self.open.as_deref()?.parse().ok()?;
        let high = self.high.as_deref()?.parse().ok()?;
        let low = self.low.as_deref()?.parse().ok()?;
        let close = self.close.as_deref()?.parse().ok()?;
        let volume = self.volume.as_deref()?.parse().ok()?;
        Some((open, high, low, close, volume))
    }
}
