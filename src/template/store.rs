//! Where template files are read from.

use crate::error::{InstallerError, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

// To add a template: add ONE line here and create the file under templates/
const EMBEDDED: &[(&str, &str)] = &[
    ("agents/agent.md", include_str!("../../templates/agents/agent.md")),
    ("prompts/build.md", include_str!("../../templates/prompts/build.md")),
    ("prompts/plan.md", include_str!("../../templates/prompts/plan.md")),
    ("prompts/general.md", include_str!("../../templates/prompts/general.md")),
    ("prompts/explore.md", include_str!("../../templates/prompts/explore.md")),
    ("prompts/review.md", include_str!("../../templates/prompts/review.md")),
    ("prompts/implement.md", include_str!("../../templates/prompts/implement.md")),
    ("prompts/document.md", include_str!("../../templates/prompts/document.md")),
    ("prompts/test.md", include_str!("../../templates/prompts/test.md")),
    ("prompts/compaction.md", include_str!("../../templates/prompts/compaction.md")),
    ("prompts/summary.md", include_str!("../../templates/prompts/summary.md")),
    ("prompts/title.md", include_str!("../../templates/prompts/title.md")),
    ("commands/command.md", include_str!("../../templates/commands/command.md")),
    ("skills/SKILL.md", include_str!("../../templates/skills/SKILL.md")),
    ("skills/git-workflow.md", include_str!("../../templates/skills/git-workflow.md")),
    (
        "skills/code-review-checklist.md",
        include_str!("../../templates/skills/code-review-checklist.md"),
    ),
    (
        "skills/testing-strategy.md",
        include_str!("../../templates/skills/testing-strategy.md"),
    ),
    ("skills/test-patterns.md", include_str!("../../templates/skills/test-patterns.md")),
    ("skills/refactor-guide.md", include_str!("../../templates/skills/refactor-guide.md")),
    (
        "skills/documentation-standards.md",
        include_str!("../../templates/skills/documentation-standards.md"),
    ),
    ("skills/project-setup.md", include_str!("../../templates/skills/project-setup.md")),
    ("skills/security-checklist.md", include_str!("../../templates/skills/security-checklist.md")),
    ("skills/performance-guide.md", include_str!("../../templates/skills/performance-guide.md")),
    ("context/overview.md", include_str!("../../templates/context/overview.md")),
    ("context/tech-stack.md", include_str!("../../templates/context/tech-stack.md")),
    ("context/conventions.md", include_str!("../../templates/context/conventions.md")),
    ("context/structure.md", include_str!("../../templates/context/structure.md")),
    ("context/agent-notes.md", include_str!("../../templates/context/agent-notes.md")),
    (
        "plugins/behavior-guard.ts",
        include_str!("../../templates/plugins/behavior-guard.ts"),
    ),
    (
        "plugins/context-loader.ts",
        include_str!("../../templates/plugins/context-loader.ts"),
    ),
    (
        "plugins/session-logger.ts",
        include_str!("../../templates/plugins/session-logger.ts"),
    ),
    (
        "plugins/safety-guard.ts",
        include_str!("../../templates/plugins/safety-guard.ts"),
    ),
    ("tools/read-context.ts", include_str!("../../templates/tools/read-context.ts")),
    ("tools/webfetch.ts", include_str!("../../templates/tools/webfetch.ts")),
    ("tools/websearch.ts", include_str!("../../templates/tools/websearch.ts")),
    ("tools/memory.ts", include_str!("../../templates/tools/memory.ts")),
];

/// Template source for one install run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateStore {
    /// Files compiled into the binary.
    Embedded,
    /// Same relative layout read from a directory on disk.
    Directory(PathBuf),
}

impl Default for TemplateStore {
    fn default() -> Self {
        TemplateStore::Embedded
    }
}

impl TemplateStore {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        TemplateStore::Directory(dir.into())
    }

    /// Load the template at `relative` (e.g. `prompts/build.md`).
    pub fn load(&self, relative: &str) -> Result<String> {
        match self {
            TemplateStore::Embedded => EMBEDDED
                .iter()
                .find(|(path, _)| *path == relative)
                .map(|(_, content)| content.to_string())
                .ok_or_else(|| InstallerError::TemplateNotFound(relative.to_string())),
            TemplateStore::Directory(dir) => {
                let path = dir.join(relative);
                std::fs::read_to_string(&path).map_err(|e| match e.kind() {
                    ErrorKind::NotFound => {
                        InstallerError::TemplateNotFound(path.display().to_string())
                    }
                    _ => InstallerError::Io(e),
                })
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateStore::Embedded => "embedded".to_string(),
            TemplateStore::Directory(dir) => dir.display().to_string(),
        }
    }
}
