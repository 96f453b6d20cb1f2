use crate::error::{InstallerError, Result};
use semver::Version;

// Compile-time constants from Cargo.toml and build.rs
pub const VERSION: &str = env!("OCTOAGENTS_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

// GitHub repository queried for releases
pub const REPO_OWNER: &str = "octoagents";
pub const REPO_NAME: &str = "octoagents";

/// Check if another version is newer than the current version
pub fn is_newer_version(other: &str) -> bool {
    match (Version::parse(VERSION), Version::parse(other)) {
        (Ok(current), Ok(latest)) => latest > current,
        _ => false,
    }
}

/// Latest published release tag without its `v` prefix.
pub fn fetch_latest_release() -> Result<String> {
    let releases = self_update::backends::github::ReleaseList::configure()
        .repo_owner(REPO_OWNER)
        .repo_name(REPO_NAME)
        .build()?
        .fetch()?;

    releases
        .first()
        .map(|release| release.version.trim_start_matches('v').to_string())
        .ok_or_else(|| InstallerError::UpdateError("no releases published".to_string()))
}

/// Like [`fetch_latest_release`], but network and API failures yield `None`.
pub fn latest_release() -> Option<String> {
    fetch_latest_release()
        .map_err(|e| tracing::debug!("Release lookup failed: {}", e))
        .ok()
}
