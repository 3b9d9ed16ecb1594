//! File logging through tracing
//!
//! Lookups run inside request handlers, so nothing is ever written to
//! stdout/stderr; all diagnostics go to a daily rolling file.

use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Filter directive variable, e.g. `OBRAND_LOG=obrand_themes=trace`
pub const LOG_FILTER_ENV: &str = "OBRAND_LOG";

/// Overrides the log directory
pub const LOG_DIR_ENV: &str = "OBRAND_LOG_DIR";

const LOG_FILE_PREFIX: &str = "obrand.log";
const DEFAULT_FILTER: &str = "obrand=info,obrand_core=info,obrand_themes=info,warn";

/// Install the global subscriber writing to `log_dir` (or the default
/// directory) and return the directory in use.
///
/// # Examples
/// ```bash
/// OBRAND_LOG=debug obrand themes
/// OBRAND_LOG_DIR=/tmp/obrand obrand messages login
/// ```
pub fn init(log_dir: Option<&Path>) -> Result<PathBuf> {
    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => log_directory()?,
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let env_filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
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
        .try_init()
        .map_err(|e| Error::config(format!("logging already initialized: {}", e)))?;

    tracing::info!("obrand {} logging to {}", env!("CARGO_PKG_VERSION"), log_dir.display());

    Ok(log_dir)
}

/// Directory for log files: `$OBRAND_LOG_DIR`, else `<data_local_dir>/obrand/logs`
pub fn log_directory() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_local_dir()
        .ok_or_else(|| Error::config("cannot determine local data directory for logs"))?;
    Ok(base.join("obrand").join("logs"))
}
