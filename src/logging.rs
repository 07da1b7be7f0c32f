//! Logging configuration using tracing
//!
//! The terminal UI owns stdout, so log records go to a daily rolling file.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV: &str = "REVTREE_LOG";

/// Initialize the logging subsystem
///
/// Logs are written to `<data_local_dir>/revtree/logs/revtree.log.<date>`.
/// Log level is controlled by the `REVTREE_LOG` environment variable.
///
/// ```bash
/// REVTREE_LOG=debug revtree HEAD
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "revtree.log");

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("revtree=info,warn"));

    // try_init: a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init();

    tracing::info!("revtree {} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
pub fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("revtree").join("logs")
}
