//! Agent roles and per-role model resolution.
//!
//! Every install run resolves one [`ModelAssignment`] per role by walking the
//! provider tiers in priority order:
//!
//! ```text
//! bailian (primary, paid) -> copilot (secondary) -> free (OpenCode Zen)
//! ```
//!
//! The first tier flagged available wins. Housekeeping roles (title,
//! summary, compaction) run on every turn and are pinned to the free tier.

pub mod tables;

use crate::providers::ProviderAvailability;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Logical agent identity, stable across resolution, validation and file naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Build,
    Plan,
    General,
    Explore,
    Review,
    Implement,
    Document,
    Test,
    Compaction,
    Summary,
    Title,
}

impl AgentRole {
    pub const ALL: [AgentRole; 11] = [
        AgentRole::Build,
        AgentRole::Plan,
        AgentRole::General,
        AgentRole::Explore,
        AgentRole::Review,
        AgentRole::Implement,
        AgentRole::Document,
        AgentRole::Test,
        AgentRole::Compaction,
        AgentRole::Summary,
        AgentRole::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Build => "build",
            AgentRole::Plan => "plan",
            AgentRole::General => "general",
            AgentRole::Explore => "explore",
            AgentRole::Review => "review",
            AgentRole::Implement => "implement",
            AgentRole::Document => "document",
            AgentRole::Test => "test",
            AgentRole::Compaction => "compaction",
            AgentRole::Summary => "summary",
            AgentRole::Title => "title",
        }
    }

    /// High-frequency, low-stakes roles that always run on the free tier.
    pub fn is_housekeeping(&self) -> bool {
        matches!(
            self,
            AgentRole::Compaction | AgentRole::Summary | AgentRole::Title
        )
    }

    /// Roles that replace an agent OpenCode ships built in.
    pub fn overrides_builtin(&self) -> bool {
        matches!(
            self,
            AgentRole::Build
                | AgentRole::Plan
                | AgentRole::General
                | AgentRole::Explore
                | AgentRole::Compaction
                | AgentRole::Summary
                | AgentRole::Title
        )
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentRole::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown agent role: {}", s))
    }
}

/// A priority level in the provider fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bailian,
    Copilot,
    Free,
}

impl Tier {
    /// Fallback chain, highest priority first. The last entry is unconditional.
    pub const CHAIN: [Tier; 3] = [Tier::Bailian, Tier::Copilot, Tier::Free];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bailian => "bailian",
            Tier::Copilot => "copilot",
            Tier::Free => "free",
        }
    }

    pub fn is_available(&self, providers: &ProviderAvailability) -> bool {
        match self {
            Tier::Bailian => providers.bailian,
            Tier::Copilot => providers.copilot,
            Tier::Free => true,
        }
    }

    /// The tier's static entry for `role`.
    pub fn model_for(&self, role: AgentRole) -> ModelSpec {
        match self {
            Tier::Bailian => tables::bailian(role),
            Tier::Copilot => tables::copilot(role),
            Tier::Free => tables::free(role),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bailian" => Ok(Tier::Bailian),
            "copilot" => Ok(Tier::Copilot),
            "free" => Ok(Tier::Free),
            other => Err(format!(
                "unknown provider \"{}\" (expected bailian, copilot, or free)",
                other
            )),
        }
    }
}

/// One static table entry: a model id plus its sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpec {
    pub model: &'static str,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub thinking: bool,
}

impl ModelSpec {
    pub const fn new(model: &'static str) -> Self {
        Self {
            model,
            temperature: None,
            top_p: None,
            thinking: false,
        }
    }

    pub const fn temperature(mut self, value: f32) -> Self {
        self.temperature = Some(value);
        self
    }

    pub const fn top_p(mut self, value: f32) -> Self {
        self.top_p = Some(value);
        self
    }

    pub const fn thinking(mut self) -> Self {
        self.thinking = true;
        self
    }
}

/// Resolver output for a single role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAssignment {
    pub role: AgentRole,
    pub model: String,
    pub tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    pub thinking: bool,
}

impl ModelAssignment {
    fn from_spec(role: AgentRole, tier: Tier, spec: ModelSpec) -> Self {
        Self {
            role,
            model: spec.model.to_string(),
            tier,
            temperature: spec.temperature,
            top_p: spec.top_p,
            thinking: spec.thinking,
        }
    }
}

/// Resolve the model for `role` against the detected providers.
pub fn resolve(role: AgentRole, providers: &ProviderAvailability) -> ModelAssignment {
    if role.is_housekeeping() {
        return ModelAssignment::from_spec(role, Tier::Free, Tier::Free.model_for(role));
    }

    let tier = Tier::CHAIN
        .iter()
        .copied()
        .find(|tier| tier.is_available(providers))
        .unwrap_or(Tier::Free);

    ModelAssignment::from_spec(role, tier, tier.model_for(role))
}

/// Resolve every role in `roles`, preserving order.
pub fn resolve_all(roles: &[AgentRole], providers: &ProviderAvailability) -> Vec<ModelAssignment> {
    roles.iter().map(|role| resolve(*role, providers)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn providers(bailian: bool, copilot: bool) -> ProviderAvailability {
        ProviderAvailability { bailian, copilot }
    }

    #[test]
    fn test_every_role_resolves_for_every_provider_combination() {
        for (bailian, copilot) in [(true, true), (true, false), (false, true), (false, false)] {
            for role in AgentRole::ALL {
                let assignment = resolve(role, &providers(bailian, copilot));
                assert!(!assignment.model.is_empty(), "{} has no model", role);
                assert!(assignment.model.contains('/'), "{} model lacks provider prefix", role);
            }
        }
    }

    #[test]
    fn test_every_tier_table_is_complete() {
        for tier in Tier::CHAIN {
            for role in AgentRole::ALL {
                let spec = tier.model_for(role);
                assert!(!spec.model.is_empty(), "{} missing {}", tier, role);
            }
        }
    }

    #[test]
    fn test_housekeeping_pinned_to_free() {
        for role in AgentRole::ALL.iter().filter(|r| r.is_housekeeping()) {
            for p in [providers(true, true), providers(true, false), providers(false, true)] {
                let assignment = resolve(*role, &p);
                assert_eq!(assignment.tier, Tier::Free);
                assert_eq!(assignment.model, tables::free(*role).model);
            }
        }
    }

    #[test]
    fn test_primary_tier_wins() {
        let assignment = resolve(AgentRole::Build, &providers(true, true));
        assert_eq!(assignment.tier, Tier::Bailian);
        assert_eq!(assignment.model, tables::bailian(AgentRole::Build).model);
    }

    #[test]
    fn test_secondary_tier_when_primary_missing() {
        let assignment = resolve(AgentRole::Review, &providers(false, true));
        assert_eq!(assignment.tier, Tier::Copilot);
        assert_eq!(assignment.model, tables::copilot(AgentRole::Review).model);
    }

    #[test]
    fn test_free_tier_when_nothing_detected() {
        let assignments = resolve_all(&AgentRole::ALL, &providers(false, false));
        assert!(assignments.iter().all(|a| a.tier == Tier::Free));
    }

    #[test]
    fn test_sampling_parameters_carried() {
        let assignment = resolve(AgentRole::Build, &providers(true, false));
        let spec = tables::bailian(AgentRole::Build);
        assert_eq!(assignment.temperature, spec.temperature);
        assert_eq!(assignment.top_p, spec.top_p);
        assert_eq!(assignment.thinking, spec.thinking);
    }

    #[test]
    fn test_role_round_trip_names() {
        for role in AgentRole::ALL {
            assert_eq!(role.as_str().parse::<AgentRole>().unwrap(), role);
        }
        assert!("orchestrator".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("copilot".parse::<Tier>().unwrap(), Tier::Copilot);
        assert!("chutes".parse::<Tier>().is_err());
    }
}
