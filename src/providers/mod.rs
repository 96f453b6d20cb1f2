//! Upstream provider detection.
//!
//! Detection never fails: an unreadable or malformed candidate file counts
//! as "not found" and the next signal is tried.

use crate::models::Tier;
use crate::utils::jsonc;
use crate::utils::HostEnv;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const BAILIAN_PROVIDER_ID: &str = "bailian-coding-plan";
pub const BAILIAN_ENV_KEY: &str = "DASHSCOPE_API_KEY";
pub const COPILOT_ENV_KEYS: [&str; 3] = ["GITHUB_TOKEN", "GH_TOKEN", "GITHUB_COPILOT_TOKEN"];

/// Which upstream providers are usable on this machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProviderAvailability {
    pub bailian: bool,
    pub copilot: bool,
}

impl ProviderAvailability {
    pub fn none() -> Self {
        Self::default()
    }

    /// Availability that makes `tier` the first match in the fallback chain.
    pub fn forced(tier: Tier) -> Self {
        match tier {
            Tier::Bailian => Self {
                bailian: true,
                copilot: false,
            },
            Tier::Copilot => Self {
                bailian: false,
                copilot: true,
            },
            Tier::Free => Self::none(),
        }
    }

    pub fn any(&self) -> bool {
        self.bailian || self.copilot
    }
}

/// Inspect `env` and the well-known config files for provider credentials.
pub fn detect(env: &HostEnv) -> ProviderAvailability {
    let availability = ProviderAvailability {
        bailian: has_bailian(env),
        copilot: has_copilot(env),
    };
    tracing::debug!(?availability, "Provider detection finished");
    availability
}

fn has_bailian(env: &HostEnv) -> bool {
    if env.var(BAILIAN_ENV_KEY).is_some() {
        tracing::debug!("{} is set", BAILIAN_ENV_KEY);
        return true;
    }

    if opencode_config_candidates(env)
        .iter()
        .any(|path| config_has_bailian_key(path))
    {
        return true;
    }

    env.data_home()
        .map(|data| data.join("opencode").join("auth.json"))
        .is_some_and(|path| auth_has_bailian_key(&path))
}

fn has_copilot(env: &HostEnv) -> bool {
    if env.any_set(&COPILOT_ENV_KEYS) {
        tracing::debug!("GitHub token found in environment");
        return true;
    }

    let Some(config_home) = env.config_home() else {
        return false;
    };
    let dir = config_home.join("github-copilot");
    ["hosts.json", "apps.json"]
        .iter()
        .map(|name| dir.join(name))
        .any(|path| {
            let found = path.is_file();
            if found {
                tracing::debug!("Found Copilot credentials at {}", path.display());
            }
            found
        })
}

/// Candidate OpenCode config files, in lookup order.
pub fn opencode_config_candidates(env: &HostEnv) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(config_home) = env.config_home() {
        let dir = config_home.join("opencode");
        paths.push(dir.join("opencode.jsonc"));
        paths.push(dir.join("opencode.json"));
    }
    if let Some(home) = env.home() {
        let dir = home.join(".opencode");
        paths.push(dir.join("opencode.jsonc"));
        paths.push(dir.join("opencode.json"));
    }
    paths
}

fn read_json(path: &Path) -> Option<Value> {
    let text = std::fs::read_to_string(path).ok()?;
    match jsonc::parse(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring unparsable {}: {}", path.display(), e);
            None
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn config_has_bailian_key(path: &Path) -> bool {
    let Some(config) = read_json(path) else {
        return false;
    };
    let found = config
        .pointer(&format!("/provider/{}/options/apiKey", BAILIAN_PROVIDER_ID))
        .is_some_and(is_truthy);
    if found {
        tracing::debug!("Found {} api key in {}", BAILIAN_PROVIDER_ID, path.display());
    }
    found
}

fn auth_has_bailian_key(path: &Path) -> bool {
    read_json(path)
        .and_then(|auth| {
            auth.get(BAILIAN_PROVIDER_ID)
                .and_then(|entry| entry.get("key"))
                .and_then(Value::as_str)
                .map(|key| !key.is_empty())
        })
        .unwrap_or(false)
}
