//! Integration tests for the market data fetcher
//!
//! Retry, backoff and validation behavior against a mocked provider.

#[path = "test_utils.rs"]
mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use tickerpulse::error::PipelineError;
use tickerpulse::services::alphavantage::AlphaVantageProvider;
use tickerpulse::services::market_data::{Interval, MarketDataProvider, RetryPolicy};
use tickerpulse::services::rate_limit::CallBudget;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use test_utils::{daily_payload, falling_closes, intraday_payload};

fn fast_policy(max_attempts: usize) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        min_delay: Duration::from_millis(1),
        backoff_factor: 2.0,
    }
}

fn provider(server: &MockServer, policy: RetryPolicy) -> AlphaVantageProvider {
    AlphaVantageProvider::new("test-key".to_string(), policy).with_base_url(server.uri())
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|reqs| reqs.len())
        .unwrap_or_default()
}

#[tokio::test]
async fn fetch_parses_and_sorts_hourly_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "CRYPTO_INTRADAY"))
        .and(query_param("symbol", "BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intraday_payload(&falling_closes(30))))
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(1));
    let candles = provider
        .fetch_candles("BTC", "USD", Interval::Hour, 100)
        .await
        .unwrap();

    assert_eq!(candles.len(), 30);
    for pair in candles.windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
    }
    assert_eq!(candles[0].close, 500.0);
    assert_eq!(candles[29].close, 471.0);
}

#[tokio::test]
async fn fetch_truncates_to_most_recent_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intraday_payload(&falling_closes(30))))
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(1));
    let candles = provider
        .fetch_candles("BTC", "USD", Interval::Hour, 10)
        .await
        .unwrap();

    assert_eq!(candles.len(), 10);
    // Newest 10 bars survive: closes 480 down to 471.
    assert_eq!(candles[0].close, 480.0);
    assert_eq!(candles[9].close, 471.0);
}

#[tokio::test]
async fn fetch_daily_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "DIGITAL_CURRENCY_DAILY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_payload(&falling_closes(30))))
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(1));
    let candles = provider
        .fetch_candles("BTC", "USD", Interval::Day, 100)
        .await
        .unwrap();

    assert_eq!(candles.len(), 30);
}

#[tokio::test]
async fn incomplete_bars_are_dropped_not_fatal() {
    let mut payload = intraday_payload(&falling_closes(28));
    let series = payload["Time Series Crypto (60min)"]
        .as_object_mut()
        .unwrap();
    series.insert(
        "2026-03-05 00:00:00".to_string(),
        serde_json::json!({ "1. open": "100", "2. high": "101" }),
    );
    series.insert(
        "2026-03-05 01:00:00".to_string(),
        serde_json::json!({
            "1. open": "100",
            "2. high": "101",
            "3. low": "99",
            "4. close": "not-a-number",
            "5. volume": "1000"
        }),
    );

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(1));
    let candles = provider
        .fetch_candles("BTC", "USD", Interval::Hour, 100)
        .await
        .unwrap();

    assert_eq!(candles.len(), 28);
}

#[tokio::test]
async fn transient_failures_retry_until_success() {
    let server = MockServer::start().await;
    // First four attempts fail at the transport level, the fifth succeeds.
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(4)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intraday_payload(&falling_closes(30))))
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(5));
    let candles = provider
        .fetch_candles("BTC", "USD", Interval::Hour, 100)
        .await
        .unwrap();

    assert_eq!(candles.len(), 30);
    assert_eq!(request_count(&server).await, 5);
}

#[tokio::test]
async fn exhausted_retries_return_data_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(5));
    let err = provider
        .fetch_candles("BTC", "USD", Interval::Hour, 100)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::DataUnavailable(_)));
    assert_eq!(request_count(&server).await, 5);
}

#[tokio::test]
async fn provider_rejection_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "Error Message": "Invalid API call" })),
        )
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(5));
    let err = provider
        .fetch_candles("BTC", "USD", Interval::Hour, 100)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::DataUnavailable(_)));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn throttle_note_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "Note": "API call frequency exceeded" })),
        )
        .mount(&server)
        .await;

    let provider = provider(&server, fast_policy(3));
    let err = provider
        .fetch_candles("BTC", "USD", Interval::Hour, 100)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::DataUnavailable(_)));
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn empty_symbol_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    let provider = provider(&server, fast_policy(5));

    let err = provider
        .fetch_candles("  ", "USD", Interval::Hour, 100)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::DataUnavailable(_)));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn exhausted_call_budget_stops_attempts_early() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let budget = Arc::new(CallBudget::new(2));
    let provider = AlphaVantageProvider::new("test-key".to_string(), fast_policy(5))
        .with_base_url(server.uri())
        .with_call_budget(budget);

    let err = provider
        .fetch_candles("BTC", "USD", Interval::Hour, 100)
        .await
        .unwrap_err();

    // Two attempts consume the budget; the third is refused locally.
    assert!(matches!(err, PipelineError::DataUnavailable(_)));
    assert_eq!(request_count(&server).await, 2);
}
