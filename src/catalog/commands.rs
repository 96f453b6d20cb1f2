use crate::models::AgentRole;
use crate::template::TemplateVars;

/// A slash command bound to one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub agent: AgentRole,
    pub prompt: &'static str,
}

impl CommandDefinition {
    /// Variables for `commands/command.md`; all are required.
    pub fn template_vars(&self) -> TemplateVars {
        let mut vars = TemplateVars::new();
        vars.set("name", self.name)
            .set("description", self.description)
            .set("agent", self.agent.as_str())
            .set("prompt", self.prompt);
        vars
    }
}

pub const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "octo-review",
        description: "Perform code review on a file or path",
        agent: AgentRole::Review,
        prompt: "Review the following file or path in depth. Check correctness, security \
                 vulnerabilities, performance problems and style issues.\n\nTarget:",
    },
    CommandDefinition {
        name: "octo-test",
        description: "Execute the test suite and analyze results",
        agent: AgentRole::Test,
        prompt: "Run the test suite and analyze the results. When tests fail, find the root \
                 cause and propose a fix.\n\nScope:",
    },
    CommandDefinition {
        name: "octo-implement",
        description: "Implement a feature from a specification",
        agent: AgentRole::Implement,
        prompt: "Implement the following feature or change. Read the existing code first and \
                 follow the project conventions.\n\nSpecification:",
    },
    CommandDefinition {
        name: "octo-docs",
        description: "Generate or update documentation",
        agent: AgentRole::Document,
        prompt: "Generate or update documentation for the following.\n\nTarget:",
    },
    CommandDefinition {
        name: "octo-deps",
        description: "Analyze dependencies of a module",
        agent: AgentRole::Explore,
        prompt: "Analyze the dependencies of the following module. Report direct imports, \
                 consumers and circular dependencies.\n\nModule:",
    },
    CommandDefinition {
        name: "octo-explain",
        description: "Explain architecture or code structure",
        agent: AgentRole::Explore,
        prompt: "Explain the architecture and code structure below. Describe how it works, the \
                 key abstractions and the data flow.\n\nTarget:",
    },
    CommandDefinition {
        name: "octo-plan-feature",
        description: "Break a feature down into tasks",
        agent: AgentRole::Plan,
        prompt: "Break the following feature down into concrete implementation tasks. Include \
                 dependencies, risks and effort.\n\nFeature:",
    },
    CommandDefinition {
        name: "octo-plan-refactor",
        description: "Plan a refactoring with impact analysis",
        agent: AgentRole::Plan,
        prompt: "Plan the following refactoring. Analyze the impact, list the affected files and \
                 outline a migration path.\n\nRefactoring:",
    },
    CommandDefinition {
        name: "octo-ship",
        description: "End-to-end: implement, test, review, document",
        agent: AgentRole::Build,
        prompt: "Deliver the following feature end to end:\n\
                 1. Implement it with @implement\n\
                 2. Run the tests with @test\n\
                 3. Review the code with @review\n\
                 4. Update the documentation with @document\n\
                 5. Remind the user to commit manually (never commit automatically)\n\n\
                 Feature:",
    },
];

pub fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMANDS.iter().find(|c| c.name == name)
}
