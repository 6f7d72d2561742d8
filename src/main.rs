//! Tickerpulse service
//!
//! Periodically evaluates tracked symbols and delivers changed trading
//! signals through Telegram, alongside a small status/metrics HTTP surface.

use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Instant;
use tickerpulse::config::Config;
use tickerpulse::core::http::{start_server, AppState};
use tickerpulse::core::scheduler::{SchedulerConfig, SignalScheduler};
use tickerpulse::core::PipelineContext;
use tickerpulse::db::SignalLog;
use tickerpulse::logging;
use tickerpulse::metrics::Metrics;
use tickerpulse::services::alphavantage::AlphaVantageProvider;
use tickerpulse::services::market_data::MarketDataProvider;
use tickerpulse::services::notifier::Notifier;
use tickerpulse::services::rate_limit::CallBudget;
use tickerpulse::services::telegram::TelegramNotifier;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    // Missing required configuration is fatal; nothing starts without it.
    let config = Config::from_env()?;

    let env = tickerpulse::config::get_environment();
    info!("Starting Tickerpulse");
    info!(environment = %env, "Environment");
    info!(symbols = ?config.symbols, "Tracked symbols");
    info!(
        interval_secs = config.cycle_interval.as_secs(),
        "Signal evaluation: every {} seconds",
        config.cycle_interval.as_secs()
    );

    let metrics = Arc::new(Metrics::new()?);

    let call_budget = Arc::new(CallBudget::new(config.daily_call_limit));
    let mut provider =
        AlphaVantageProvider::new(config.api_key.clone(), config.retry.clone())
            .with_call_budget(call_budget)
            .with_metrics(metrics.clone());
    if let Some(url) = &config.market_data_url {
        provider = provider.with_base_url(url.clone());
    }
    let provider: Arc<dyn MarketDataProvider> = Arc::new(provider);

    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        config.telegram_token.clone(),
        config.chat_id.clone(),
    ));

    let signal_log = Arc::new(SignalLog::open(&config.signal_log_path).await?);
    info!(path = %config.signal_log_path.display(), "Signal log opened");

    let context = Arc::new(PipelineContext::new(
        provider,
        notifier,
        Some(signal_log),
        Some(metrics.clone()),
    ));

    let scheduler_config = SchedulerConfig {
        symbols: config.symbols.clone(),
        quote_currency: config.quote_currency.clone(),
        candle_interval: config.candle_interval,
        candle_limit: config.candle_limit,
        cycle_interval: config.cycle_interval,
        shutdown_grace: config.shutdown_grace,
        sl_percent: config.sl_percent,
        tp_percent: config.tp_percent,
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = SignalScheduler::new(scheduler_config, context);
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown_rx));

    let state = AppState {
        metrics,
        start_time: Arc::new(Instant::now()),
    };
    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, state).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("Service started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down...");
    shutdown_tx.send(true).ok();
    if let Err(e) = scheduler_handle.await {
        error!(error = %e, "scheduler task failed during shutdown");
    }
    server_handle.abort();
    info!("Stopped");

    Ok(())
}
