//! Logging initialization with environment-based formatters.
//!
//! Production gets structured JSON for log aggregation; everywhere else
//! gets colorful human-readable output.

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stdout);

    match get_environment().as_str() {
        "production" | "prod" => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json())
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.with_ansi(true))
            .init(),
    }
}
