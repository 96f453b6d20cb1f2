//! Static per-tier model tables.
//!
//! Each table is an exhaustive `match` over [`AgentRole`], so a role without
//! an entry fails to compile.

use super::{AgentRole, ModelSpec};

// Model Studio coding plan (bailian)
pub const BAILIAN_QWEN35_PLUS: &str = "bailian-coding-plan/qwen3.5-plus";
pub const BAILIAN_QWEN3_MAX: &str = "bailian-coding-plan/qwen3-max-2026-01-23";
pub const BAILIAN_QWEN3_CODER_PLUS: &str = "bailian-coding-plan/qwen3-coder-plus";
pub const BAILIAN_QWEN3_CODER_NEXT: &str = "bailian-coding-plan/qwen3-coder-next";
pub const BAILIAN_GLM5: &str = "bailian-coding-plan/glm-5";
pub const BAILIAN_GLM47: &str = "bailian-coding-plan/glm-4.7";
pub const BAILIAN_KIMI: &str = "bailian-coding-plan/kimi-k2.5";
pub const BAILIAN_MINIMAX: &str = "bailian-coding-plan/MiniMax-M2.5";

// GitHub Copilot
pub const COPILOT_GPT5_MINI: &str = "github-copilot/gpt-5-mini";
pub const COPILOT_GPT41: &str = "github-copilot/gpt-4.1";

// OpenCode Zen built-ins
pub const FREE_BIG_PICKLE: &str = "opencode/big-pickle";
pub const FREE_GPT5_NANO: &str = "opencode/gpt-5-nano";
pub const FREE_TRINITY: &str = "opencode/trinity-large-preview-free";

pub fn bailian(role: AgentRole) -> ModelSpec {
    match role {
        AgentRole::Build => ModelSpec::new(BAILIAN_QWEN3_CODER_NEXT).temperature(0.2),
        AgentRole::Plan => ModelSpec::new(BAILIAN_QWEN3_MAX).temperature(0.5).thinking(),
        AgentRole::General => ModelSpec::new(BAILIAN_QWEN35_PLUS).temperature(0.3).thinking(),
        AgentRole::Explore => ModelSpec::new(BAILIAN_GLM5).temperature(0.3).thinking(),
        AgentRole::Review => ModelSpec::new(BAILIAN_GLM47).temperature(0.1).thinking(),
        AgentRole::Implement => ModelSpec::new(BAILIAN_QWEN3_CODER_PLUS).temperature(0.2),
        AgentRole::Document => ModelSpec::new(BAILIAN_KIMI)
            .temperature(0.4)
            .top_p(0.95),
        AgentRole::Test => ModelSpec::new(BAILIAN_MINIMAX).temperature(0.2),
        AgentRole::Compaction => ModelSpec::new(FREE_TRINITY),
        AgentRole::Summary => ModelSpec::new(FREE_GPT5_NANO),
        AgentRole::Title => ModelSpec::new(FREE_GPT5_NANO),
    }
}

pub fn copilot(role: AgentRole) -> ModelSpec {
    match role {
        AgentRole::Build => ModelSpec::new(COPILOT_GPT5_MINI).temperature(0.2),
        AgentRole::Plan => ModelSpec::new(COPILOT_GPT5_MINI).temperature(0.5),
        AgentRole::General => ModelSpec::new(COPILOT_GPT5_MINI).temperature(0.3),
        AgentRole::Explore => ModelSpec::new(COPILOT_GPT41).temperature(0.3),
        AgentRole::Review => ModelSpec::new(COPILOT_GPT5_MINI).temperature(0.1),
        AgentRole::Implement => ModelSpec::new(COPILOT_GPT5_MINI).temperature(0.2),
        AgentRole::Document => ModelSpec::new(COPILOT_GPT41).temperature(0.4),
        AgentRole::Test => ModelSpec::new(COPILOT_GPT5_MINI).temperature(0.2),
        AgentRole::Compaction => ModelSpec::new(FREE_TRINITY),
        AgentRole::Summary => ModelSpec::new(FREE_GPT5_NANO),
        AgentRole::Title => ModelSpec::new(FREE_GPT5_NANO),
    }
}

pub fn free(role: AgentRole) -> ModelSpec {
    match role {
        AgentRole::Build => ModelSpec::new(FREE_BIG_PICKLE).temperature(0.2),
        AgentRole::Plan => ModelSpec::new(FREE_TRINITY).temperature(0.5),
        AgentRole::General => ModelSpec::new(FREE_BIG_PICKLE).temperature(0.3),
        AgentRole::Explore => ModelSpec::new(FREE_TRINITY).temperature(0.3),
        AgentRole::Review => ModelSpec::new(FREE_TRINITY).temperature(0.1),
        AgentRole::Implement => ModelSpec::new(FREE_BIG_PICKLE).temperature(0.2),
        AgentRole::Document => ModelSpec::new(FREE_TRINITY).temperature(0.4),
        AgentRole::Test => ModelSpec::new(FREE_TRINITY).temperature(0.2),
        AgentRole::Compaction => ModelSpec::new(FREE_TRINITY),
        AgentRole::Summary => ModelSpec::new(FREE_GPT5_NANO),
        AgentRole::Title => ModelSpec::new(FREE_GPT5_NANO),
    }
}
