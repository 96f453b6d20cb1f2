//! Structural checks run before anything is written.
//!
//! Every check reports all of its violations; nothing here fails fast.
//! The orchestrator aborts when the aggregate list is non-empty.

use crate::agents::permission::{self, AgentPermission, Permission};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

static KEBAB_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid kebab-case regex"));
static VERB_NOUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9]+-[a-z][a-z0-9-]*$").expect("valid verb-noun regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    PermissionKey,
    PermissionValue,
    NamespaceConflict,
    AgentName,
    CommandName,
}

impl ValidationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::PermissionKey => "permission_key",
            ValidationKind::PermissionValue => "permission_value",
            ValidationKind::NamespaceConflict => "namespace_conflict",
            ValidationKind::AgentName => "agent_name",
            ValidationKind::CommandName => "command_name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)
    }
}

/// Keys outside the recognized capability set.
pub fn validate_permission_keys(permission: &AgentPermission, context: &str) -> Vec<ValidationError> {
    permission
        .iter()
        .filter(|(key, _)| !permission::is_permission_key(key))
        .map(|(key, _)| {
            ValidationError::new(
                ValidationKind::PermissionKey,
                format!("{}: unknown permission key \"{}\"", context, key),
            )
        })
        .collect()
}

/// Terminal values that are not `allow`, `ask` or `deny`.
pub fn validate_permission_values(
    permission: &AgentPermission,
    context: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (key, value) in permission.iter() {
        match value {
            Permission::Action(action) => {
                if !permission::is_action(action) {
                    errors.push(ValidationError::new(
                        ValidationKind::PermissionValue,
                        format!(
                            "{}: invalid value \"{}\" for permission \"{}\"",
                            context, action, key
                        ),
                    ));
                }
            }
            Permission::Patterns(patterns) => {
                for (pattern, action) in patterns {
                    if !permission::is_action(action) {
                        errors.push(ValidationError::new(
                            ValidationKind::PermissionValue,
                            format!(
                                "{}: invalid value \"{}\" for permission pattern \"{}\" in \"{}\"",
                                context, action, pattern, key
                            ),
                        ));
                    }
                }
            }
        }
    }
    errors
}

pub fn validate_namespace_conflicts(agent_names: &[&str], command_names: &[&str]) -> Vec<ValidationError> {
    let agents: HashSet<&str> = agent_names.iter().copied().collect();
    command_names
        .iter()
        .filter(|cmd| agents.contains(*cmd))
        .map(|cmd| {
            ValidationError::new(
                ValidationKind::NamespaceConflict,
                format!("Command name \"{}\" conflicts with agent name \"{}\"", cmd, cmd),
            )
        })
        .collect()
}

pub fn validate_agent_names(names: &[&str]) -> Vec<ValidationError> {
    names
        .iter()
        .filter(|name| !KEBAB_CASE.is_match(name))
        .map(|name| {
            ValidationError::new(
                ValidationKind::AgentName,
                format!("Agent name \"{}\" must be kebab-case", name),
            )
        })
        .collect()
}

pub fn validate_command_names(names: &[&str]) -> Vec<ValidationError> {
    names
        .iter()
        .filter(|name| !VERB_NOUN.is_match(name))
        .map(|name| {
            ValidationError::new(
                ValidationKind::CommandName,
                format!(
                    "Command name \"{}\" should use verb-noun pattern (e.g., run-review)",
                    name
                ),
            )
        })
        .collect()
}

/// Run every check and collect all violations.
///
/// `permission_sets` pairs a context label (usually the agent name) with
/// the policy to check.
pub fn validate(
    agent_names: &[&str],
    command_names: &[&str],
    permission_sets: &[(&str, &AgentPermission)],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (context, permission) in permission_sets {
        errors.extend(validate_permission_keys(permission, context));
        errors.extend(validate_permission_values(permission, context));
    }
    errors.extend(validate_namespace_conflicts(agent_names, command_names));
    errors.extend(validate_agent_names(agent_names));
    errors.extend(validate_command_names(command_names));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationKind> {
        errors.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_unknown_permission_key() {
        let perm = AgentPermission::new()
            .with("read", Permission::allow())
            .with("teleport", Permission::allow());
        let errors = validate_permission_keys(&perm, "build");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationKind::PermissionKey);
        assert_eq!(errors[0].message, "build: unknown permission key \"teleport\"");
    }

    #[test]
    fn test_invalid_bare_value() {
        let perm = AgentPermission::new().with("edit", Permission::Action("maybe".to_string()));
        let errors = validate_permission_values(&perm, "plan");
        assert_eq!(
            errors[0].to_string(),
            "[permission_value] plan: invalid value \"maybe\" for permission \"edit\""
        );
    }

    #[test]
    fn test_invalid_pattern_value_names_pattern() {
        let perm = AgentPermission::new().with(
            "bash",
            Permission::patterns([("*", "allow"), ("git push*", "never"), ("rm*", "nope")]),
        );
        let errors = validate_permission_values(&perm, "build");
        assert_eq!(errors.len(), 2);
        assert!(errors[0]
            .message
            .contains("invalid value \"never\" for permission pattern \"git push*\" in \"bash\""));
    }

    #[test]
    fn test_namespace_conflict() {
        let errors = validate_namespace_conflicts(&["run-tests", "build"], &["run-tests"]);
        assert_eq!(kinds(&errors), vec![ValidationKind::NamespaceConflict]);
        assert_eq!(
            errors[0].message,
            "Command name \"run-tests\" conflicts with agent name \"run-tests\""
        );
    }

    #[test]
    fn test_agent_names_must_be_kebab_case() {
        let errors = validate_agent_names(&["build", "code-review", "Build", "1st", "snake_case"]);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.kind == ValidationKind::AgentName));
    }

    #[test]
    fn test_command_names_need_verb_noun() {
        let errors = validate_command_names(&["octo-review", "run-tests", "review", "a-b", "Run-it"]);
        let bad: Vec<&str> = errors
            .iter()
            .map(|e| e.message.split('"').nth(1).unwrap_or(""))
            .collect();
        assert_eq!(bad, vec!["review", "a-b", "Run-it"]);
    }

    #[test]
    fn test_validate_aggregates_every_check() {
        let perm = AgentPermission::new()
            .with("bogus", Permission::allow())
            .with("edit", Permission::Action("sometimes".to_string()));
        let errors = validate(
            &["run-tests", "Bad_Agent"],
            &["run-tests", "review"],
            &[("run-tests", &perm)],
        );
        let kinds = kinds(&errors);
        assert!(kinds.contains(&ValidationKind::PermissionKey));
        assert!(kinds.contains(&ValidationKind::PermissionValue));
        assert!(kinds.contains(&ValidationKind::NamespaceConflict));
        assert!(kinds.contains(&ValidationKind::AgentName));
        assert!(kinds.contains(&ValidationKind::CommandName));
    }

    #[test]
    fn test_clean_input_passes() {
        let perm = permission::full_access();
        assert!(validate(&["build"], &["octo-review"], &[("build", &perm)]).is_empty());
    }
}
