use serde::Deserialize;

use super::{UpdateInfo, RELEASES_PAGE_URL};
use crate::error::UpdateError;
use crate::http_client;

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ReleaseAsset {
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) browser_download_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct Release {
    #[serde(default)]
    pub(super) tag_name: String,
    #[serde(default)]
    pub(super) html_url: String,
    #[serde(default)]
    pub(super) body: Option<String>,
    #[serde(default)]
    pub(super) assets: Vec<ReleaseAsset>,
}

/// Shape of the `version.json` published next to the sources.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct VersionFile {
    #[serde(default)]
    pub(super) version: String,
    #[serde(default)]
    pub(super) download_url: String,
    #[serde(default)]
    pub(super) release_notes: String,
}

pub(super) fn fetch_latest_release(url: &str, current: &str) -> Result<UpdateInfo, UpdateError> {
    let release: Release = http_client::get_json(
        url,
        &[],
        &[
            ("User-Agent", "norsk-lookup-updater"),
            ("Accept", "application/vnd.github.v3+json"),
        ],
    )
    ?;
    release_info(release, current)
}

pub(super) fn fetch_version_file(url: &str, current: &str) -> Result<UpdateInfo, UpdateError> {
    let file: VersionFile = http_client::get_json(url, &[], &[])?;
    Ok(UpdateInfo {
        current_version: current.to_string(),
        latest_version: strip_v(&file.version),
        download_url: file.download_url,
        release_notes: file.release_notes,
        release_page_url: RELEASES_PAGE_URL.to_string(),
    })
}

fn release_info(release: Release, current: &str) -> Result<UpdateInfo, UpdateError> {
    let latest_version = strip_v(&release.tag_name);
    if latest_version.is_empty() {
        return Err(UpdateError::InvalidVersion(release.tag_name));
    }
    let download_url = find_installer(&release)
        .map(|asset| asset.browser_download_url.clone())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| release.html_url.clone());
    Ok(UpdateInfo {
        current_version: current.to_string(),
        latest_version,
        download_url,
        release_notes: release.body.unwrap_or_default().trim().to_string(),
        release_page_url: release.html_url,
    })
}

fn find_installer(release: &Release) -> Option<&ReleaseAsset> {
    release
        .assets
        .iter()
        .find(|asset| asset.name.to_ascii_lowercase().ends_with(".exe"))
}

fn strip_v(tag: &str) -> String {
    tag.trim().trim_start_matches('v').to_string()
}
