use std::collections::HashMap;
use std::path::PathBuf;

/// Snapshot of the environment variables the installer consults.
///
/// Detection and scope resolution read from this instead of `std::env` so a
/// run sees one consistent view and tests can build their own.
#[derive(Debug, Clone, Default)]
pub struct HostEnv {
    vars: HashMap<String, String>,
}

impl HostEnv {
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `key`, treating an empty value as unset.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// True when any of `keys` holds a non-empty value.
    pub fn any_set(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.var(key).is_some())
    }

    pub fn home(&self) -> Option<PathBuf> {
        self.var("HOME")
            .or_else(|| self.var("USERPROFILE"))
            .map(PathBuf::from)
    }

    /// `$XDG_CONFIG_HOME`, falling back to `$HOME/.config`.
    pub fn config_home(&self) -> Option<PathBuf> {
        if let Some(xdg) = self.var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg));
        }
        self.home().map(|home| home.join(".config"))
    }

    /// `$XDG_DATA_HOME`, falling back to `$HOME/.local/share`.
    pub fn data_home(&self) -> Option<PathBuf> {
        if let Some(xdg) = self.var("XDG_DATA_HOME") {
            return Some(PathBuf::from(xdg));
        }
        self.home()
            .map(|home| home.join(".local").join("share"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_is_unset() {
        let env = HostEnv::from_vars([("GH_TOKEN", ""), ("GITHUB_TOKEN", "abc")]);
        assert_eq!(env.var("GH_TOKEN"), None);
        assert_eq!(env.var("GITHUB_TOKEN"), Some("abc"));
        assert!(env.any_set(&["GH_TOKEN", "GITHUB_TOKEN"]));
        assert!(!env.any_set(&["GH_TOKEN", "GITHUB_COPILOT_TOKEN"]));
    }

    #[test]
    fn test_config_home_prefers_xdg() {
        let env = HostEnv::from_vars([("HOME", "/home/u"), ("XDG_CONFIG_HOME", "/xdg")]);
        assert_eq!(env.config_home(), Some(PathBuf::from("/xdg")));

        let env = HostEnv::from_vars([("HOME", "/home/u")]);
        assert_eq!(env.config_home(), Some(PathBuf::from("/home/u/.config")));
    }

    #[test]
    fn test_data_home_fallback() {
        let env = HostEnv::from_vars([("HOME", "/home/u")]);
        assert_eq!(env.data_home(), Some(PathBuf::from("/home/u/.local/share")));
    }

    #[test]
    fn test_no_home() {
        let env = HostEnv::default();
        assert_eq!(env.home(), None);
        assert_eq!(env.config_home(), None);
        assert_eq!(env.data_home(), None);
    }
}
