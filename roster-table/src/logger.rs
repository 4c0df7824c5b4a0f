//! Logging Infrastructure
//!
//! Console logging plus an optional daily rotating file. Notifications are
//! logged under the `notify` target and also land in their own file.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system with an optional daily rotating log file
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug"); `RUST_LOG` overrides it
/// * `json_format` - JSON lines instead of the pretty console format
/// * `log_dir` - Optional directory for file logging
///
/// # Examples
/// ```no_run
/// # use roster_table::logger::init_logger_with_file;
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
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

    let file_layers = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;

            // Application logs, everything except notifications
            let app_log = RollingFileAppender::new(Rotation::DAILY, log_dir, "roster");
            let app_layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "notify"
                }));

            // User-facing notifications only
            let notify_log = RollingFileAppender::new(Rotation::DAILY, log_dir, "notify");
            let notify_layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(std::sync::Mutex::new(notify_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "notify"
                }));

            Some(app_layer.and_then(notify_layer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layers)
        .try_init()?;

    Ok(())
}
