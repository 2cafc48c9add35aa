//! Error types.
//!
//! Only hotkey/startup failures ever reach the user; everything else is
//! absorbed close to where it happens and turned into degraded output.

use std::path::PathBuf;

use thiserror::Error;

pub use crate::logging::LoggingError;

/// Hotkey definition or monitor startup failures. Fatal at startup.
#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("hotkey '{0}' has no keys")]
    EmptyChord(String),
    #[error("hotkey monitor is running; cannot change '{0}'")]
    AlreadyRunning(String),
    #[error("failed to start the hotkey monitor thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// A JSON GET that did not produce a value.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Transport failure or non-success status.
    #[error("request failed: {0}")]
    Request(#[from] Box<ureq::Error>),
    /// The body was not the expected JSON.
    #[error("could not decode response: {0}")]
    Decode(#[source] std::io::Error),
}

/// Dictionary request failures. Never shown; the lookup yields no results.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// Update check failures. Never shown; the check yields `None`.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("invalid version '{0}'")]
    InvalidVersion(String),
}

/// Update-check cache file failures.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Popup window creation failures, reported by a [`PopupHost`](crate::popup::PopupHost).
#[derive(Debug, Error)]
pub enum PopupError {
    #[error("failed to create popup window: {0}")]
    Create(String),
    #[error("failed to render popup: {0}")]
    Render(String),
}

/// Fatal startup errors returned from the platform entry point.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Hotkey(#[from] HotkeyError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[cfg(target_os = "windows")]
    #[error("Windows API error: {0}")]
    Win32(#[from] windows::core::Error),
    #[error("event bus could not be initialized")]
    EventBus,
    #[error("{0} is only supported on Windows")]
    UnsupportedPlatform(&'static str),
}
