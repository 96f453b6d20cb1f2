//! Static catalogs: presets, commands, skills, context files and the
//! runtime plugin manifest.

pub mod commands;
pub mod presets;
pub mod skills;

pub use commands::{find_command, CommandDefinition, COMMANDS};
pub use presets::{find_preset, Preset, DEFAULT_PRESET, PRESETS};
pub use skills::{Skill, SKILLS};

/// Project context templates, written only when absent.
pub const CONTEXT_FILES: [&str; 5] = [
    "overview.md",
    "tech-stack.md",
    "conventions.md",
    "structure.md",
    "agent-notes.md",
];

/// Runtime plugins copied verbatim on every install.
pub const RUNTIME_PLUGINS: [&str; 3] = [
    "behavior-guard.ts",
    "context-loader.ts",
    "session-logger.ts",
];

/// Store and install path for a preset tool.
pub fn tool_path(tool: &str) -> String {
    format!("tools/{}.ts", tool)
}
