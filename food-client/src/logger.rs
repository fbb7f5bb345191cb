//! Logging Infrastructure
//!
//! Console output (pretty for development, JSON for production) plus an
//! optional daily rotating JSON file. Rotated files older than
//! `LOG_RETENTION_DAYS` are removed by the appender.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

const LOG_RETENTION_DAYS: usize = 14;

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Arguments
/// * `level` - Log level or filter directive (e.g., "info", "food_client=debug")
/// * `json_format` - Whether to use JSON format on the console
/// * `log_dir` - Optional directory for daily rotating log files
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// food_client::logger::init_logger("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("food-client")
                .filename_suffix("log")
                .max_log_files(LOG_RETENTION_DAYS)
                .build(dir)?;
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(std::sync::Mutex::new(appender))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
