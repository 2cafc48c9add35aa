//! Logging setup for the application.
//!
//! Installs a global tracing subscriber writing to stderr (the console the
//! app runs in) and to a daily log file in [`app_dirs::logs_dir`].
//! Old files are pruned by the appender.

use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use crate::app_dirs::{self, AppDirError};

/// Maximum number of log files to retain.
const MAX_LOG_FILES: usize = 7;
const LOG_FILE_PREFIX: &str = "norsk-lookup";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// No usable log directory.
    #[error("Failed to prepare log directory: {0}")]
    LogDir(#[from] AppDirError),
    /// Failed to build the rolling file appender.
    #[error("Failed to create log file appender: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing to stderr plus a rolling log file.
///
/// Subsequent calls are no-ops. On error nothing is installed and the
/// caller can fall back to [`init_stderr_only`].
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(&log_dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);
    let file_layer = fmt::layer().with_ansi(false).with_writer(file_writer);

    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(stderr_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Logging initialized; log directory {}", log_dir.display());
    Ok(())
}

/// Console-only fallback when the log directory is unusable.
pub fn init_stderr_only() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
