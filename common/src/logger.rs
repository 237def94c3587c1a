//! Tracing bootstrap shared by the scoreboard service and the judge CLI.
//!
//! Log lines always go to a non-blocking daily-rolling file under `logs/`;
//! the stdout layer is optional so the judge's operator-facing output stays
//! readable.

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global tracing subscriber and returns the file appender guard.
///
/// The guard must be kept alive for the lifetime of the process, otherwise
/// buffered log lines are dropped on exit.
pub fn init_logging(log_file: &str, log_to_stdout: bool) -> WorkerGuard {
    std::fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        let stdout_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true);
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
