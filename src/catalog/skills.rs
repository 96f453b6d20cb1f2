use crate::template::TemplateVars;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
}

impl Skill {
    /// Store path of the skill body.
    pub fn body_template(&self) -> String {
        format!("skills/{}.md", self.name)
    }

    /// Path of the rendered skill relative to the install root.
    pub fn install_path(&self) -> String {
        format!("skills/{}/SKILL.md", self.name)
    }

    /// Variables for `skills/SKILL.md`.
    pub fn template_vars(&self, body: &str) -> TemplateVars {
        let mut vars = TemplateVars::new();
        vars.set("name", self.name)
            .set("description", self.description)
            .set("version", self.version)
            .set("body", body.trim());
        vars
    }
}

pub const SKILLS: &[Skill] = &[
    Skill {
        name: "git-workflow",
        description: "Git branching, commit message and pull request conventions",
        version: "1.0",
    },
    Skill {
        name: "code-review-checklist",
        description: "Checklist for reviewing correctness, security and maintainability",
        version: "1.0",
    },
    Skill {
        name: "testing-strategy",
        description: "Choosing what to test and how to structure unit and integration tests",
        version: "1.0",
    },
    Skill {
        name: "test-patterns",
        description: "Test structure, naming, isolation and coverage expectations",
        version: "1.0",
    },
    Skill {
        name: "refactor-guide",
        description: "Safe step-by-step refactoring and common refactoring moves",
        version: "1.0",
    },
    Skill {
        name: "documentation-standards",
        description: "README, API documentation and writing style conventions",
        version: "1.0",
    },
    Skill {
        name: "project-setup",
        description: "Repository layout, tooling, configuration and CI scaffolding",
        version: "1.0",
    },
    Skill {
        name: "security-checklist",
        description: "Input handling, secrets, access control and dependency checks",
        version: "1.0",
    },
    Skill {
        name: "performance-guide",
        description: "Measuring and fixing performance problems",
        version: "1.0",
    },
];
