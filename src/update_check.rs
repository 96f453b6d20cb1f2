use crate::version::{is_newer_version, latest_release, REPO_NAME, REPO_OWNER, VERSION};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Configuration for update checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheckConfig {
    pub enabled: bool,
    pub check_interval_hours: u64,
}

/// Cached result of the last release lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCheckCache {
    pub last_check: u64,
    pub latest_version: Option<String>,
    pub update_available: bool,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

impl UpdateCheckCache {
    /// Uses saturating_sub so a clock moving backwards never reads as stale
    pub fn is_stale(&self, interval_hours: u64) -> bool {
        let elapsed_hours = now_secs().saturating_sub(self.last_check) / 3600;
        elapsed_hours >= interval_hours
    }
}

fn cache_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".octoagents").join("update-check.json"))
}

fn load_cache() -> Option<UpdateCheckCache> {
    let content = fs::read_to_string(cache_path()?).ok()?;
    serde_json::from_str(&content).ok()
}

/// Save the cache with owner-only permissions (0600)
fn save_cache(cache: &UpdateCheckCache) {
    let Some(path) = cache_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(content) = serde_json::to_string_pretty(cache) {
        if fs::write(&path, content).is_ok() {
            #[cfg(unix)]
            {
                let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o600));
            }
        }
    }
}

fn perform_version_check() -> UpdateCheckCache {
    // Only cache strings that parse as semver
    let latest_version = latest_release().filter(|v| Version::parse(v).is_ok());
    let update_available = latest_version
        .as_deref()
        .map(is_newer_version)
        .unwrap_or(false);

    UpdateCheckCache {
        last_check: now_secs(),
        latest_version,
        update_available,
    }
}

/// CI users cannot act on the notice
fn is_ci_environment() -> bool {
    [
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_HOME",
        "BUILDKITE",
    ]
    .iter()
    .any(|var| std::env::var(var).is_ok())
}

/// Keep only characters valid in semver so a hostile tag cannot inject escapes
fn sanitize_version(version: &str) -> String {
    version
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '.' || *c == '-' || *c == '+')
        .collect()
}

fn display_update_notification(latest_version: &str) {
    let safe_version = sanitize_version(latest_version);
    let inner = 56;

    let rule = "─".repeat(inner);
    let download = format!("https://github.com/{}/{}/releases", REPO_OWNER, REPO_NAME);

    eprintln!();
    eprintln!("╭{}╮", rule);
    eprintln!("│{:^inner$}│", "A new version of octoagents is available!", inner = inner);
    eprintln!("├{}┤", rule);
    eprintln!("│  Current: {:<w$}│", VERSION, w = inner - 11);
    eprintln!("│  Latest:  {:<w$}│", safe_version, w = inner - 11);
    eprintln!("├{}┤", rule);
    eprintln!("│  {:<w$}│", download, w = inner - 2);
    eprintln!("╰{}╯", rule);
    eprintln!();
}

/// Check for a newer release and print a notice. Never fails.
pub fn check_and_notify(config: &UpdateCheckConfig) {
    if !config.enabled || is_ci_environment() {
        return;
    }

    let cached = load_cache();
    let needs_check = cached
        .as_ref()
        .map(|c| c.is_stale(config.check_interval_hours))
        .unwrap_or(true);

    let cache = if needs_check {
        tracing::debug!("Checking GitHub for a newer release");
        let fresh = perform_version_check();
        save_cache(&fresh);
        fresh
    } else {
        match cached {
            Some(cache) => cache,
            None => return,
        }
    };

    if cache.update_available {
        if let Some(version) = &cache.latest_version {
            display_update_notification(version);
        }
    }
}
