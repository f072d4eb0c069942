//! Logging configuration module
//!
//! Structured logging with a console layer and an optional rolling file layer.

use std::io;

use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;

/// Initialize logging based on configuration
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    // Console layer with colors
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .with_writer(io::stdout);

    // File layer if configured
    if let Some(ref dir) = settings.log_dir {
        let file_appender = rolling::daily(dir, "knap-console.log");

        let file_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .json()
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
    }

    tracing::info!("Logging initialized - level: {}", settings.level);

    Ok(())
}
