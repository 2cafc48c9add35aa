//! Application-level settings.

use std::time::Duration;

use super::constants::*;
use super::hotkey::Hotkey;
use super::popup_config::PopupConfig;

/// Everything the coordinator and the Windows entry point need to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub hotkey: Hotkey,
    pub poll_interval: Duration,
    pub stop_timeout: Duration,
    pub capture_settle_delay: Duration,
    pub max_results: usize,
    pub lookup_popup: PopupConfig,
    pub update_popup: PopupConfig,
    /// `None` disables the startup update check.
    pub update_check_delay: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hotkey: Hotkey::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            capture_settle_delay: DEFAULT_CAPTURE_SETTLE_DELAY,
            max_results: DEFAULT_MAX_RESULTS,
            lookup_popup: PopupConfig::default(),
            update_popup: PopupConfig::update_notification(),
            update_check_delay: Some(DEFAULT_UPDATE_CHECK_DELAY),
        }
    }
}
