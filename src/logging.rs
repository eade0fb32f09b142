use std::fs;
use std::io;
use std::path::Path;

use time::macros::format_description;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{self, fmt, prelude::*};

/// Initialize logging to stderr and, optionally, to a file.
/// Returns the file writer's guard, which must be kept alive for the duration of the program.
///
/// # Arguments
/// * `no_color` - Disable ANSI colors in stderr output
/// * `log_level` - Override log filter (otherwise uses RUST_LOG or defaults to "info")
/// * `log_file` - Append DEBUG-level logs to this file as well
///
/// # Logging Behavior
/// - **Stderr**: Logs at the configured level - loading progress and traversal entry points
/// - **File**: Logs at DEBUG level regardless of the stderr filter
///
/// Calling this more than once is harmless; later calls keep the first subscriber.
pub fn init_logger(
    no_color: bool,
    log_level: Option<&str>,
    log_file: Option<&Path>,
) -> io::Result<Option<WorkerGuard>> {
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::UTC,
        format_description!("[[[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z]"),
    );

    let stderr_filter = match log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_ansi(!no_color)
        .with_filter(stderr_filter);

    match log_file {
        Some(path) => {
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let file_layer = fmt::layer()
                .with_writer(non_blocking)
                .with_timer(timer)
                .with_ansi(false) // No ANSI colors in file
                .with_filter(tracing_subscriber::EnvFilter::new("debug"));

            let result = tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .try_init();
            ignore_already_set(result)?;
            Ok(Some(guard))
        }
        None => {
            let result = tracing_subscriber::registry()
                .with(stderr_layer)
                .try_init();
            ignore_already_set(result)?;
            Ok(None)
        }
    }
}

/// Tests and embedding applications may have installed a subscriber already.
fn ignore_already_set(
    result: Result<(), tracing_subscriber::util::TryInitError>,
) -> io::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if e.to_string().contains("already been set") || e.to_string().contains("SetLoggerError") {
                Ok(())
            } else {
                Err(io::Error::new(io::ErrorKind::Other, e))
            }
        }
    }
}
