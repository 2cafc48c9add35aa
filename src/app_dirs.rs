//! Per-user application directory.
//!
//! Logs and the update-check cache live under the OS config directory
//! (`%APPDATA%\NorskLookup` on Windows). `NORSK_LOOKUP_HOME` replaces the
//! base directory for portable setups; it must be an absolute path.

use std::path::PathBuf;
use std::sync::Mutex;

use directories::BaseDirs;
use thiserror::Error;

use crate::model::constants::APP_DIR_NAME;

const HOME_OVERRIDE_VAR: &str = "NORSK_LOOKUP_HOME";

static BASE_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No absolute per-user base directory could be resolved.
    #[error("No per-user directory available for application files")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The application root, created if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(base.join(APP_DIR_NAME))
}

/// `logs` inside the application root, created if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join("logs"))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn config_base_dir() -> Option<PathBuf> {
    if let Some(path) = BASE_OVERRIDE.lock().ok().and_then(|guard| guard.clone()) {
        return Some(path);
    }
    if let Some(path) = std::env::var_os(HOME_OVERRIDE_VAR) {
        return absolute(PathBuf::from(path));
    }
    BaseDirs::new().and_then(|dirs| absolute(dirs.config_dir().to_path_buf()))
}

/// Relative paths would resolve against the working directory.
fn absolute(path: PathBuf) -> Option<PathBuf> {
    if path.is_absolute() {
        Some(path)
    } else {
        tracing::warn!(path = %path.display(), "Ignoring relative application directory");
        None
    }
}

/// Points the application root at `base` until dropped. Holders are serialized.
#[cfg(test)]
pub(crate) struct BaseOverride {
    _serial: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl BaseOverride {
    pub(crate) fn set(base: &std::path::Path) -> Self {
        static SERIAL: Mutex<()> = Mutex::new(());
        let serial = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *BASE_OVERRIDE.lock().unwrap() = Some(base.to_path_buf());
        Self { _serial: serial }
    }
}

#[cfg(test)]
impl Drop for BaseOverride {
    fn drop(&mut self) {
        if let Ok(mut guard) = BASE_OVERRIDE.lock() {
            *guard = None;
        }
    }
}
