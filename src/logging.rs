// Logging setup.
// Daily rolling log file in the log directory; the terminal is never written to.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CheatsheetError, Result};

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_ENV: &str = "CHEATSHEET_LOG";

const LOG_FILE_NAME: &str = "cheatsheet.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. The returned guard must be held until
/// exit so buffered lines are flushed.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| CheatsheetError::Other(format!("failed to install logger: {e}")))?;

    Ok(guard)
}

/// Like [`init`], but a log directory that cannot be used is reported on
/// stderr and the app runs without a file log.
pub fn init_or_warn(log_dir: &Path) -> Option<WorkerGuard> {
    match init(log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!(
                "cheatsheet: file logging disabled ({}): {e}",
                log_dir.display()
            );
            None
        }
    }
}
