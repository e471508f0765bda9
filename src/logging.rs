//! Logging configuration for convopulse

use std::path::Path;

use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::Result;

/// Initialize logging with console and daily-rolling file output.
pub fn init_logging_with_level(level: &str) -> Result<()> {
    let logs_dir = Path::new("logs");
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let env_filter = EnvFilter::new(format!("{level},convopulse={level}"));

    let file_appender = tracing_appender::rolling::daily("logs", "convopulse.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized with level: {level}");

    // Keep the appender guard alive for the life of the process
    std::mem::forget(guard);

    Ok(())
}

/// Initialize simple stderr-only logging for tests.
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| crate::ConvoPulseError::Custom(format!("logging init failed: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}
