use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::app_dirs::{self, AppDirError};
use crate::error::CacheError;

const CACHE_FILE_NAME: &str = "update_check.json";

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    last_check: f64,
}

/// Remembers when the last update check ran.
#[derive(Debug, Clone)]
pub struct UpdateCache {
    path: PathBuf,
}

impl UpdateCache {
    /// `update_check.json` in the per-user application directory.
    pub fn in_app_dir() -> Result<Self, AppDirError> {
        Ok(Self::at(app_dirs::app_root_dir()?.join(CACHE_FILE_NAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Time of the last recorded check; `None` when missing or unreadable.
    pub fn last_check(&self) -> Option<SystemTime> {
        let text = fs::read_to_string(&self.path).ok()?;
        let file: CacheFile = serde_json::from_str(&text).ok()?;
        Duration::try_from_secs_f64(file.last_check)
            .ok()
            .map(|since| UNIX_EPOCH + since)
    }

    pub fn should_check(&self, interval: Duration) -> bool {
        self.should_check_at(SystemTime::now(), interval)
    }

    pub fn should_check_at(&self, now: SystemTime, interval: Duration) -> bool {
        match self.last_check() {
            // A clock that moved backwards reads as "just checked".
            Some(last) => now.duration_since(last).map_or(false, |age| age >= interval),
            None => true,
        }
    }

    pub fn mark_checked(&self) -> Result<(), CacheError> {
        self.mark_checked_at(SystemTime::now())
    }

    pub fn mark_checked_at(&self, when: SystemTime) -> Result<(), CacheError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| CacheError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let last_check = when
            .duration_since(UNIX_EPOCH)
            .map(|since| since.as_secs_f64())
            .unwrap_or(0.0);
        let json = serde_json::to_string(&CacheFile { last_check })?;
        fs::write(&self.path, json).map_err(|source| CacheError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
