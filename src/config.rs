use crate::agents::{AgentCustomization, AgentPermission, Permission};
use crate::catalog::DEFAULT_PRESET;
use crate::cli::Cli;
use crate::error::{InstallerError, Result};
use crate::models::AgentRole;
use crate::plugins::DEFAULT_PLUGINS;
use crate::template::TemplateStore;
use crate::update_check::UpdateCheckConfig;
use crate::utils::path::resolve_against;
use crate::utils::HostEnv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".octoagents.toml";
const DEFAULT_UPDATE_INTERVAL_HOURS: u64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Preset installed when `--preset` is absent
    #[serde(default)]
    pub preset: Option<String>,

    /// Content plugins applied to agents, in order
    #[serde(default)]
    pub plugins: Option<Vec<String>>,

    /// Read templates from this directory instead of the embedded set
    #[serde(default)]
    pub templates_dir: Option<String>,

    #[serde(default)]
    pub update_check: UpdateCheckSettings,

    /// Per-role customisation keyed by role name
    #[serde(default)]
    pub agents: BTreeMap<String, AgentSettings>,

    /// Verbose logging (not stored in config file)
    #[serde(skip)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UpdateCheckSettings {
    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub interval_hours: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AgentSettings {
    #[serde(default)]
    pub temperature: Option<f64>,

    #[serde(default)]
    pub top_p: Option<f64>,

    #[serde(default)]
    pub color: Option<String>,

    /// Bare tokens (`edit = "ask"`) or pattern tables (`[agents.build.permission.bash]`)
    #[serde(default)]
    pub permission: toml::Table,
}

impl AgentSettings {
    fn merge(mut self, other: Self) -> Self {
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.top_p.is_some() {
            self.top_p = other.top_p;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        for (key, value) in other.permission {
            self.permission.insert(key, value);
        }
        self
    }
}

/// Split a comma list, dropping blanks.
pub fn parse_name_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn toml_token(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn permission_from_table(table: &toml::Table) -> AgentPermission {
    let mut permission = AgentPermission::new();
    for (key, value) in table {
        let entry = match value {
            toml::Value::Table(patterns) => Permission::Patterns(
                patterns
                    .iter()
                    .map(|(pattern, action)| (pattern.clone(), toml_token(action)))
                    .collect(),
            ),
            other => Permission::Action(toml_token(other)),
        };
        permission.set(key, entry);
    }
    permission
}

fn check_range(role: &str, field: &str, value: Option<f64>, max: f64) -> Result<Option<f32>> {
    match value {
        Some(v) if !(0.0..=max).contains(&v) => Err(InstallerError::InvalidConfig(format!(
            "agents.{}.{} must be between 0 and {}, got {}",
            role, field, max, v
        ))),
        other => Ok(other.map(|v| v as f32)),
    }
}

impl Config {
    /// Load configuration with precedence:
    /// 1. CLI flags (applied later via with_cli_overrides)
    /// 2. Environment variables
    /// 3. Project config (.octoagents.toml in the working directory)
    /// 4. Global config (~/.octoagents.toml)
    /// 5. Built-in defaults
    pub fn load(env: &HostEnv, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = env.home() {
            let global_config = home.join(CONFIG_FILE_NAME);
            if global_config.exists() {
                tracing::debug!("Loading {}", global_config.display());
                config = config.merge(Self::from_file(&global_config)?);
            }
        }

        let project_config = project_root.join(CONFIG_FILE_NAME);
        if project_config.exists() {
            tracing::debug!("Loading {}", project_config.display());
            config = config.merge(Self::from_file(&project_config)?);
        }

        Ok(config.merge_env(env))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(mut self, other: Self) -> Self {
        if other.preset.is_some() {
            self.preset = other.preset;
        }
        if other.plugins.is_some() {
            self.plugins = other.plugins;
        }
        if other.templates_dir.is_some() {
            self.templates_dir = other.templates_dir;
        }
        if other.update_check.enabled.is_some() {
            self.update_check.enabled = other.update_check.enabled;
        }
        if other.update_check.interval_hours.is_some() {
            self.update_check.interval_hours = other.update_check.interval_hours;
        }

        for (role, settings) in other.agents {
            let merged = match self.agents.remove(&role) {
                Some(existing) => existing.merge(settings),
                None => settings,
            };
            self.agents.insert(role, merged);
        }

        self
    }

    /// Apply environment variable overrides. Empty values count as unset.
    fn merge_env(mut self, env: &HostEnv) -> Self {
        if let Some(preset) = env.var("OCTOAGENTS_PRESET") {
            self.preset = Some(preset.to_string());
        }

        if let Some(plugins) = env.var("OCTOAGENTS_PLUGINS") {
            self.plugins = Some(parse_name_list(plugins));
        }

        if env.var("OCTOAGENTS_NO_UPDATE_CHECK").is_some() {
            self.update_check.enabled = Some(false);
        }

        self
    }

    /// Apply CLI overrides (highest precedence)
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        self.verbose = cli.verbose;

        if let Some(preset) = &cli.preset {
            self.preset = Some(preset.clone());
        }

        if cli.no_plugins {
            self.plugins = Some(Vec::new());
        } else if let Some(plugins) = &cli.plugins {
            self.plugins = Some(
                plugins
                    .iter()
                    .flat_map(|p| parse_name_list(p))
                    .collect(),
            );
        }

        if let Some(dir) = &cli.templates {
            self.templates_dir = Some(dir.to_string_lossy().to_string());
        }

        self
    }

    pub fn preset(&self) -> String {
        self.preset
            .clone()
            .unwrap_or_else(|| DEFAULT_PRESET.to_string())
    }

    pub fn plugins(&self) -> Vec<String> {
        self.plugins
            .clone()
            .unwrap_or_else(|| DEFAULT_PLUGINS.iter().map(|s| s.to_string()).collect())
    }

    /// Template store for the run; relative directories resolve against `cwd`.
    pub fn template_store(&self, cwd: &Path) -> Result<TemplateStore> {
        match &self.templates_dir {
            None => Ok(TemplateStore::Embedded),
            Some(dir) => resolve_against(Path::new(dir), cwd)
                .map(TemplateStore::from_dir)
                .ok_or_else(|| {
                    InstallerError::InvalidConfig(format!(
                        "cannot expand templates_dir \"{}\" without HOME",
                        dir
                    ))
                }),
        }
    }

    pub fn update_check_config(&self) -> UpdateCheckConfig {
        UpdateCheckConfig {
            enabled: self.update_check.enabled.unwrap_or(true),
            check_interval_hours: self
                .update_check
                .interval_hours
                .unwrap_or(DEFAULT_UPDATE_INTERVAL_HOURS),
        }
    }

    /// Typed `[agents.<role>]` tables. Unknown role names are rejected;
    /// permission entries are passed through for the validator.
    pub fn customizations(&self) -> Result<BTreeMap<AgentRole, AgentCustomization>> {
        let mut customizations = BTreeMap::new();
        for (name, settings) in &self.agents {
            let role: AgentRole = name
                .parse()
                .map_err(|_| InstallerError::UnknownRole(name.clone()))?;
            customizations.insert(
                role,
                AgentCustomization {
                    temperature: check_range(name, "temperature", settings.temperature, 2.0)?,
                    top_p: check_range(name, "top_p", settings.top_p, 1.0)?,
                    color: settings.color.clone(),
                    permission: permission_from_table(&settings.permission),
                },
            );
        }
        Ok(customizations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(toml_str: &str) -> Config {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.preset(), "standard");
        assert_eq!(config.plugins(), vec!["safety-guard".to_string()]);
        assert_eq!(config.template_store(Path::new("/w")).unwrap(), TemplateStore::Embedded);
        assert!(config.update_check_config().enabled);
        assert_eq!(config.update_check_config().check_interval_hours, 24);
    }

    #[test]
    fn test_merge_config() {
        let base = parse(
            r##"
preset = "full"
plugins = ["safety-guard", "conventions"]

[agents.build]
temperature = 0.1
color = "#111111"
"##,
        );
        let project = parse(
            r#"
preset = "minimal"

[agents.build]
temperature = 0.4
"#,
        );

        let merged = base.merge(project);
        assert_eq!(merged.preset(), "minimal");
        assert_eq!(merged.plugins().len(), 2);
        assert_eq!(merged.agents["build"].temperature, Some(0.4));
        assert_eq!(merged.agents["build"].color.as_deref(), Some("#111111"));
    }

    #[test]
    fn test_permission_tables_keep_order() {
        let config = parse(
            r#"
[agents.build.permission]
edit = "ask"

[agents.build.permission.bash]
"*" = "ask"
"git status*" = "allow"
"git push*" = "deny"
"#,
        );
        let custom = config.customizations().unwrap();
        let build = &custom[&AgentRole::Build];

        assert_eq!(build.permission.get("edit"), Some(&Permission::ask()));
        assert_eq!(
            build.permission.get("bash"),
            Some(&Permission::patterns([
                ("*", "ask"),
                ("git status*", "allow"),
                ("git push*", "deny"),
            ]))
        );
    }

    #[test]
    fn test_non_string_permission_value_kept_for_validation() {
        let config = parse("[agents.plan.permission]\nedit = true\n");
        let custom = config.customizations().unwrap();
        assert_eq!(
            custom[&AgentRole::Plan].permission.get("edit"),
            Some(&Permission::Action("true".to_string()))
        );
    }

    #[test]
    fn test_unknown_role_rejected() {
        let config = parse("[agents.orchestrator]\ntemperature = 0.2\n");
        assert!(matches!(
            config.customizations(),
            Err(InstallerError::UnknownRole(name)) if name == "orchestrator"
        ));
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let config = parse("[agents.build]\ntemperature = 3.5\n");
        assert!(matches!(
            config.customizations(),
            Err(InstallerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_layers_global_then_project() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        std::fs::write(
            home.path().join(CONFIG_FILE_NAME),
            "preset = \"full\"\n[update_check]\nenabled = false\n",
        )
        .unwrap();
        std::fs::write(project.path().join(CONFIG_FILE_NAME), "preset = \"minimal\"\n").unwrap();

        let env = HostEnv::from_vars([("HOME", home.path().to_str().unwrap())]);
        let config = Config::load(&env, project.path()).unwrap();
        assert_eq!(config.preset(), "minimal");
        assert!(!config.update_check_config().enabled);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join(CONFIG_FILE_NAME), "preset = [").unwrap();
        assert!(matches!(
            Config::load(&HostEnv::default(), project.path()),
            Err(InstallerError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env = HostEnv::from_vars([
            ("OCTOAGENTS_PRESET", "full"),
            ("OCTOAGENTS_PLUGINS", "conventions, safety-guard"),
            ("OCTOAGENTS_NO_UPDATE_CHECK", "1"),
        ]);

        let config = Config::default().merge_env(&env);

        assert_eq!(config.preset(), "full");
        assert_eq!(config.plugins(), vec!["conventions", "safety-guard"]);
        assert!(!config.update_check_config().enabled);
    }

    #[test]
    fn test_env_snapshot_is_the_only_source() {
        let project = TempDir::new().unwrap();
        let env = HostEnv::from_vars([("OCTOAGENTS_PRESET", ""), ("OCTOAGENTS_PLUGINS", "conventions")]);

        let config = Config::load(&env, project.path()).unwrap();

        assert_eq!(config.preset(), "standard");
        assert_eq!(config.plugins(), vec!["conventions"]);
        assert!(config.update_check_config().enabled);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["octoagents", "--preset", "minimal", "--plugins", "conventions"]);
        let config = Config::default().with_cli_overrides(&cli);
        assert_eq!(config.preset(), "minimal");
        assert_eq!(config.plugins(), vec!["conventions"]);

        let cli = Cli::parse_from(["octoagents", "--no-plugins"]);
        let config = Config::default().with_cli_overrides(&cli);
        assert!(config.plugins().is_empty());
    }

    #[test]
    fn test_relative_templates_dir() {
        let config = parse("templates_dir = \"my-templates\"\n");
        assert_eq!(
            config.template_store(Path::new("/w")).unwrap(),
            TemplateStore::from_dir("/w/my-templates")
        );
    }

    #[test]
    fn test_parse_name_list() {
        assert_eq!(parse_name_list(" a, ,b ,"), vec!["a", "b"]);
        assert!(parse_name_list("").is_empty());
    }
}
