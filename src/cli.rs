use crate::install::InstallScope;
use crate::models::Tier;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "octoagents")]
#[command(about = "Install the OctoAgents agent framework into OpenCode", long_about = None)]
#[command(version = env!("OCTOAGENTS_VERSION"))]
pub struct Cli {
    /// Install scope: "project" (./.opencode) or "global" (~/.config/opencode).
    /// Prompted for when neither --scope nor --target is given.
    #[arg(long, value_name = "SCOPE", conflicts_with = "target")]
    pub scope: Option<InstallScope>,

    /// Install into this directory instead of a named scope
    #[arg(long, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Force a provider tier (bailian, copilot, free) instead of detecting
    #[arg(long, value_name = "TIER")]
    pub provider: Option<Tier>,

    /// Preset to install (full, standard, minimal)
    #[arg(long)]
    pub preset: Option<String>,

    /// Content plugins to apply, comma separated
    #[arg(long, value_name = "NAMES", value_delimiter = ',', conflicts_with = "no_plugins")]
    pub plugins: Option<Vec<String>>,

    /// Apply no content plugins
    #[arg(long = "no-plugins")]
    pub no_plugins: bool,

    /// Remove previously installed agents, commands, skills, context, plugins and tools first
    #[arg(long)]
    pub clean: bool,

    /// Show what would be written without touching the filesystem
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip agents that replace OpenCode built-ins
    #[arg(long = "no-overrides")]
    pub no_overrides: bool,

    /// Read templates from this directory instead of the embedded set
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Show debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["octoagents"]);
        assert!(cli.scope.is_none());
        assert!(cli.provider.is_none());
        assert!(!cli.dry_run);
        assert!(cli.plugins.is_none());
    }

    #[test]
    fn test_typed_values() {
        let cli = Cli::parse_from([
            "octoagents",
            "--scope",
            "global",
            "--provider",
            "copilot",
            "--plugins",
            "safety-guard,conventions",
        ]);
        assert_eq!(cli.scope, Some(InstallScope::Global));
        assert_eq!(cli.provider, Some(Tier::Copilot));
        assert_eq!(
            cli.plugins,
            Some(vec!["safety-guard".to_string(), "conventions".to_string()])
        );
    }

    #[test]
    fn test_invalid_scope_rejected() {
        let err = Cli::try_parse_from(["octoagents", "--scope", "system"]).unwrap_err();
        assert!(err.to_string().contains("--scope requires"));
    }

    #[test]
    fn test_scope_conflicts_with_target() {
        assert!(Cli::try_parse_from(["octoagents", "--scope", "project", "--target", "/tmp/x"]).is_err());
    }

    #[test]
    fn test_plugins_conflict_with_no_plugins() {
        assert!(Cli::try_parse_from(["octoagents", "--plugins", "conventions", "--no-plugins"]).is_err());
    }
}
