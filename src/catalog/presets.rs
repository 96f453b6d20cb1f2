use crate::catalog::commands::{find_command, CommandDefinition};
use crate::error::{InstallerError, Result};
use crate::models::AgentRole;

pub const DEFAULT_PRESET: &str = "standard";

/// Named bundle of roles, tools and commands installed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub roles: &'static [AgentRole],
    pub tools: &'static [&'static str],
    pub commands: &'static [&'static str],
}

const ALL_COMMANDS: &[&str] = &[
    "octo-review",
    "octo-test",
    "octo-implement",
    "octo-docs",
    "octo-deps",
    "octo-explain",
    "octo-plan-feature",
    "octo-plan-refactor",
    "octo-ship",
];

pub const PRESETS: [Preset; 3] = [
    Preset {
        name: "full",
        description: "Every agent, tool and command",
        roles: &AgentRole::ALL,
        tools: &["read-context", "webfetch", "websearch", "memory"],
        commands: ALL_COMMANDS,
    },
    Preset {
        name: "standard",
        description: "Every agent and command with the web and context tools",
        roles: &AgentRole::ALL,
        tools: &["read-context", "webfetch", "websearch"],
        commands: ALL_COMMANDS,
    },
    Preset {
        name: "minimal",
        description: "Build, plan, explore and implement with housekeeping",
        roles: &[
            AgentRole::Build,
            AgentRole::Plan,
            AgentRole::Explore,
            AgentRole::Implement,
            AgentRole::Compaction,
            AgentRole::Summary,
            AgentRole::Title,
        ],
        tools: &["read-context"],
        commands: &["octo-implement", "octo-explain"],
    },
];

pub fn available_names() -> String {
    PRESETS.iter().map(|p| p.name).collect::<Vec<_>>().join(", ")
}

/// Look up a preset by exact name.
pub fn find_preset(name: &str) -> Result<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| InstallerError::UnknownPreset {
            name: name.to_string(),
            available: available_names(),
        })
}

impl Preset {
    /// Roles to install, dropping built-in overrides when requested.
    pub fn roles_for(&self, no_overrides: bool) -> Vec<AgentRole> {
        self.roles
            .iter()
            .copied()
            .filter(|role| !(no_overrides && role.overrides_builtin()))
            .collect()
    }

    /// Definitions for every command the preset names.
    pub fn command_definitions(&self) -> Result<Vec<&'static CommandDefinition>> {
        self.commands
            .iter()
            .map(|name| {
                find_command(name).ok_or_else(|| {
                    InstallerError::InvalidConfig(format!(
                        "preset \"{}\" names unknown command \"{}\"",
                        self.name, name
                    ))
                })
            })
            .collect()
    }
}
