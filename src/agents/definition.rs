use super::permission::AgentPermission;
use super::registry;
use crate::models::{AgentRole, ModelAssignment, Tier};
use crate::template::TemplateVars;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    Primary,
    Subagent,
    All,
}

impl AgentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentMode::Primary => "primary",
            AgentMode::Subagent => "subagent",
            AgentMode::All => "all",
        }
    }
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-supplied adjustments for one role, from `[agents.<role>]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentCustomization {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub color: Option<String>,
    pub permission: AgentPermission,
}

/// One renderable agent file.
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    pub role: AgentRole,
    pub name: String,
    pub description: String,
    pub mode: AgentMode,
    pub model: String,
    pub tier: Tier,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub thinking: bool,
    pub color: Option<String>,
    pub hidden: bool,
    pub permission: AgentPermission,
    pub prompt: String,
}

impl AgentDefinition {
    /// Merge the role's static metadata with its resolved model.
    pub fn new(assignment: &ModelAssignment, prompt: impl Into<String>) -> Self {
        let meta = registry::meta(assignment.role);
        Self {
            role: assignment.role,
            name: assignment.role.as_str().to_string(),
            description: meta.description.to_string(),
            mode: meta.mode,
            model: assignment.model.clone(),
            tier: assignment.tier,
            temperature: assignment.temperature,
            top_p: assignment.top_p,
            thinking: assignment.thinking,
            color: meta.color.map(str::to_string),
            hidden: meta.hidden,
            permission: meta.permission,
            prompt: prompt.into(),
        }
    }

    pub fn customize(mut self, customization: &AgentCustomization) -> Self {
        if let Some(temperature) = customization.temperature {
            self.temperature = Some(temperature);
        }
        if let Some(top_p) = customization.top_p {
            self.top_p = Some(top_p);
        }
        if let Some(color) = &customization.color {
            self.color = Some(color.clone());
        }
        self.permission = self.permission.merge(&customization.permission);
        self
    }

    /// Variables for `agents/agent.md`.
    ///
    /// `description`, `mode`, `model`, `permission` and `prompt` are required;
    /// the sampling parameters, `color`, `hidden` and `thinking` are optional.
    pub fn template_vars(&self) -> TemplateVars {
        let mut vars = TemplateVars::new();
        vars.set("name", self.name.as_str())
            .set("description", self.description.as_str())
            .set("mode", self.mode.as_str())
            .set("model", self.model.as_str())
            .set("permission", self.permission.to_frontmatter())
            .set("prompt", self.prompt.trim())
            .optional("temperature", self.temperature.map(|t| t.to_string()))
            .optional("top_p", self.top_p.map(|p| p.to_string()))
            .optional("color", self.color.clone())
            .optional("hidden", self.hidden.then_some("true"))
            .optional("thinking", self.thinking.then_some("true"));
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::permission::Permission;
    use crate::models;
    use crate::providers::ProviderAvailability;

    fn definition(role: AgentRole, providers: ProviderAvailability) -> AgentDefinition {
        AgentDefinition::new(&models::resolve(role, &providers), "Prompt body")
    }

    #[test]
    fn test_definition_takes_resolved_model() {
        let def = definition(AgentRole::Review, ProviderAvailability::forced(Tier::Copilot));
        assert_eq!(def.tier, Tier::Copilot);
        assert_eq!(def.model, models::tables::copilot(AgentRole::Review).model);
        assert_eq!(def.name, "review");
        assert_eq!(def.mode, AgentMode::Subagent);
    }

    #[test]
    fn test_customization_overrides_fields() {
        let custom = AgentCustomization {
            temperature: Some(0.7),
            top_p: None,
            color: Some("#000000".to_string()),
            permission: AgentPermission::new().with("bash", Permission::ask()),
        };
        let def = definition(AgentRole::Build, ProviderAvailability::none()).customize(&custom);

        assert_eq!(def.temperature, Some(0.7));
        assert_eq!(def.color.as_deref(), Some("#000000"));
        assert_eq!(def.permission.get("bash"), Some(&Permission::ask()));
        assert_eq!(def.permission.get("edit"), Some(&Permission::allow()));
    }

    #[test]
    fn test_template_vars_optional_fields() {
        let def = definition(AgentRole::Title, ProviderAvailability::none());
        let vars = def.template_vars();

        assert_eq!(vars.get("hidden"), Some("true"));
        assert_eq!(vars.get("color"), None);
        assert_eq!(vars.get("temperature"), None);
        assert_eq!(vars.get("model"), Some(models::tables::free(AgentRole::Title).model));
    }
}
