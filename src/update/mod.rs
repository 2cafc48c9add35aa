//! Once-a-day check for a newer release.
//!
//! Every failure is absorbed and reported as "no update"; the check never
//! interrupts lookups.

mod cache;
mod github;

use std::time::Duration;

use semver::{BuildMetadata, Version};

pub use cache::UpdateCache;

use crate::model::{RELEASE_NOTES_MAX_CHARS, UPDATE_CHECK_INTERVAL};

pub const RELEASE_API_URL: &str = "https://api.github.com/repos/oslo-c/norsk_lookup/releases/latest";
pub const VERSION_FILE_URL: &str =
    "https://raw.githubusercontent.com/oslo-c/norsk_lookup/main/version.json";
pub const RELEASES_PAGE_URL: &str = "https://github.com/oslo-c/norsk_lookup/releases";

/// Version this binary was built as.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the release source reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInfo {
    pub current_version: String,
    pub latest_version: String,
    pub download_url: String,
    pub release_notes: String,
    pub release_page_url: String,
}

impl UpdateInfo {
    /// True when `latest_version` is strictly newer than `current_version`.
    /// Unparseable versions never count as newer.
    pub fn is_newer(&self) -> bool {
        match (
            parse_version(&self.latest_version),
            parse_version(&self.current_version),
        ) {
            (Some(latest), Some(current)) => latest > current,
            _ => false,
        }
    }

    pub fn format_notification(&self) -> String {
        let mut message = format!(
            "Update available: v{} → v{}\n\n",
            self.current_version, self.latest_version
        );
        if !self.release_notes.is_empty() {
            let mut notes: String = self
                .release_notes
                .chars()
                .take(RELEASE_NOTES_MAX_CHARS)
                .collect();
            if self.release_notes.chars().count() > RELEASE_NOTES_MAX_CHARS {
                notes.push_str("...");
            }
            message.push_str(&notes);
            message.push_str("\n\n");
        }
        message.push_str("Click to download");
        message
    }
}

/// Lenient version parse: leading `v` allowed, missing minor/patch are zero.
///
/// Components past the third (`1.2.3.4`) become build metadata, which still
/// orders numerically; trailing zero components are dropped so `1.2.3.0`
/// equals `1.2.3`.
pub fn parse_version(text: &str) -> Option<Version> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    if let Ok(version) = Version::parse(trimmed) {
        return Some(version);
    }
    let parts: Vec<u64> = trimmed
        .split('.')
        .map(|part| part.parse().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [major] => Some(Version::new(*major, 0, 0)),
        [major, minor] => Some(Version::new(*major, *minor, 0)),
        [major, minor, patch, extra @ ..] => {
            let mut version = Version::new(*major, *minor, *patch);
            let significant = extra.len() - extra.iter().rev().take_while(|p| **p == 0).count();
            if significant > 0 {
                let build = extra[..significant]
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(".");
                version.build = BuildMetadata::new(&build).ok()?;
            }
            Some(version)
        }
        [] => None,
    }
}

/// Where to look and how often.
#[derive(Debug, Clone)]
pub struct UpdateChecker {
    current_version: String,
    api_url: String,
    fallback_url: String,
    interval: Duration,
    cache: UpdateCache,
}

impl UpdateChecker {
    /// Checks the project's release feeds, throttled through `cache`.
    pub fn new(cache: UpdateCache) -> Self {
        Self {
            current_version: CURRENT_VERSION.to_string(),
            api_url: RELEASE_API_URL.to_string(),
            fallback_url: VERSION_FILE_URL.to_string(),
            interval: UPDATE_CHECK_INTERVAL,
            cache,
        }
    }

    pub fn with_current_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = version.into();
        self
    }

    pub fn with_urls(mut self, api_url: impl Into<String>, fallback_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.fallback_url = fallback_url.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn cache(&self) -> &UpdateCache {
        &self.cache
    }

    /// `Some` only when a newer release exists. Without `force`, at most one
    /// network check per interval; the check time is recorded either way.
    pub fn check_for_updates(&self, force: bool) -> Option<UpdateInfo> {
        if !force && !self.cache.should_check(self.interval) {
            tracing::debug!("Update check skipped; checked recently");
            return None;
        }

        let info = github::fetch_latest_release(&self.api_url, &self.current_version)
            .or_else(|err| {
                tracing::debug!("Release API check failed: {err}");
                github::fetch_version_file(&self.fallback_url, &self.current_version)
            })
            .map_err(|err| tracing::debug!("Version file check failed: {err}"))
            .ok();

        if let Err(err) = self.cache.mark_checked() {
            tracing::warn!("Could not record update check: {err}");
        }

        let info = info.filter(UpdateInfo::is_newer)?;
        tracing::info!(
            current = %info.current_version,
            latest = %info.latest_version,
            "Update available"
        );
        Some(info)
    }
}
