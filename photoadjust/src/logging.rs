//! Logging infrastructure.
//!
//! Structured logging for update runs:
//! - Single-line compact format on stdout
//! - Optional duplicate stream to a log file (cleared on start)
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Default RUST_LOG directive when the environment does not set one.
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "photoadjust=debug,info"
    } else {
        "info"
    }
}

/// Initialize the logging system.
///
/// Logs go to stdout, and additionally to `log_file` when one is given.
/// An existing log file is cleared so each run starts a fresh log.
///
/// # Arguments
///
/// * `log_file` - Optional path of a file to duplicate the log into
/// * `debug` - Lower the default filter to debug level
///
/// # Returns
///
/// LoggingGuard that must be kept alive for logging to work
///
/// # Errors
///
/// Returns error if the log file or its directory cannot be created
pub fn init_logging(log_file: Option<&Path>, debug: bool) -> Result<LoggingGuard, io::Error> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let file_guard = match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir,
                _ => Path::new("."),
            };
            let file_name = path.file_name().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "log file path has no file name")
            })?;

            fs::create_dir_all(dir)?;
            // Clear the previous log, creating the file if necessary.
            fs::write(path, "")?;

            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .compact();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();

            Some(file_guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .init();

            None
        }
    };

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
