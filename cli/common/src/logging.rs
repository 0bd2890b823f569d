//! Logging initialization utilities.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::{LogFormat, LogLevel};

/// Initialize logging with the specified level and format.
///
/// Logs are written to stderr so stdout remains clean for event output.
pub fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let level: Level = level.into();

    let builder = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
