//! Static per-role agent metadata.

use super::definition::AgentMode;
use super::permission::{self, AgentPermission};
use crate::models::AgentRole;

#[derive(Debug, Clone)]
pub struct AgentMeta {
    pub description: &'static str,
    pub mode: AgentMode,
    pub color: Option<&'static str>,
    pub hidden: bool,
    pub permission: AgentPermission,
}

pub fn meta(role: AgentRole) -> AgentMeta {
    let (description, mode, color, permission) = match role {
        AgentRole::Build => (
            "Primary coding agent: orchestrates, delegates and edits",
            AgentMode::Primary,
            Some("#3B82F6"),
            permission::full_access(),
        ),
        AgentRole::Plan => (
            "Solution architect that breaks goals down into steps",
            AgentMode::Primary,
            Some("#8B5CF6"),
            permission::read_plan(),
        ),
        AgentRole::General => (
            "Multi-step delegated tasks",
            AgentMode::Subagent,
            Some("#6366F1"),
            permission::full_access(),
        ),
        AgentRole::Explore => (
            "Searches the codebase and the web to track down information",
            AgentMode::Subagent,
            Some("#EAB308"),
            permission::read_only(),
        ),
        AgentRole::Review => (
            "Code reviewer for quality, security and correctness",
            AgentMode::Subagent,
            Some("#EF4444"),
            permission::read_only(),
        ),
        AgentRole::Implement => (
            "Code implementer that writes and edits code to a specification",
            AgentMode::Subagent,
            Some("#F97316"),
            permission::full_access(),
        ),
        AgentRole::Document => (
            "Creates and updates documentation",
            AgentMode::Subagent,
            Some("#14B8A6"),
            permission::docs_scoped(),
        ),
        AgentRole::Test => (
            "Runs test suites and analyzes failures",
            AgentMode::Subagent,
            Some("#22C55E"),
            permission::test_runner(),
        ),
        AgentRole::Compaction => (
            "Compacts long sessions into a dense summary",
            AgentMode::Primary,
            None,
            permission::housekeeping(),
        ),
        AgentRole::Summary => (
            "Summarizes sessions",
            AgentMode::Primary,
            None,
            permission::housekeeping(),
        ),
        AgentRole::Title => (
            "Generates short session titles",
            AgentMode::Primary,
            None,
            permission::housekeeping(),
        ),
    };

    AgentMeta {
        description,
        mode,
        color,
        hidden: role.is_housekeeping(),
        permission,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_housekeeping_roles_are_hidden() {
        for role in AgentRole::ALL {
            assert_eq!(meta(role).hidden, role.is_housekeeping(), "{}", role);
        }
    }

    #[test]
    fn test_custom_subagents_are_subagents() {
        for role in AgentRole::ALL.iter().filter(|r| !r.overrides_builtin()) {
            assert_eq!(meta(*role).mode, AgentMode::Subagent);
        }
    }

    #[test]
    fn test_descriptions_are_single_line() {
        for role in AgentRole::ALL {
            let description = meta(role).description;
            assert!(!description.is_empty());
            assert!(!description.contains('\n'));
        }
    }
}
