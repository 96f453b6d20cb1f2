//! Merging installer settings into `opencode.jsonc`.
//!
//! Existing values always win; the installer only adds keys that are absent.
//! The existing file is read with a full JSON5 parser so string values are
//! never touched. Comments in it are not preserved on rewrite.

use crate::error::{InstallerError, Result};
use crate::providers::{BAILIAN_ENV_KEY, BAILIAN_PROVIDER_ID};
use serde_json::{json, Map, Value};

pub const SCHEMA_URL: &str = "https://opencode.ai/config.json";
const BAILIAN_BASE_URL: &str = "https://coding-intl.dashscope.aliyuncs.com/apps/anthropic/v1";

fn thinking_options() -> Value {
    json!({ "thinking": { "type": "enabled", "budgetTokens": 1024 } })
}

fn model(name: &str, thinking: bool, vision: bool) -> Value {
    let mut model = Map::new();
    model.insert("name".to_string(), json!(name));
    if vision {
        model.insert(
            "modalities".to_string(),
            json!({ "input": ["text", "image"], "output": ["text"] }),
        );
    }
    if thinking {
        model.insert("options".to_string(), thinking_options());
    }
    Value::Object(model)
}

/// `provider` block for the coding plan. The api key is an env reference.
pub fn bailian_provider() -> Value {
    json!({
        BAILIAN_PROVIDER_ID: {
            "npm": "@ai-sdk/anthropic",
            "name": "Model Studio Coding Plan",
            "options": {
                "baseURL": BAILIAN_BASE_URL,
                "apiKey": format!("{{env:{}}}", BAILIAN_ENV_KEY),
            },
            "models": {
                "qwen3.5-plus": model("Qwen3.5 Plus", true, true),
                "qwen3-max-2026-01-23": model("Qwen3 Max 2026-01-23", true, false),
                "qwen3-coder-plus": model("Qwen3 Coder Plus", false, false),
                "qwen3-coder-next": model("Qwen3 Coder Next", false, false),
                "glm-4.7": model("GLM-4.7", true, false),
                "glm-5": model("GLM-5", true, false),
                "kimi-k2.5": model("Kimi K2.5", true, true),
                "MiniMax-M2.5": model("MiniMax M2.5", true, false),
            }
        }
    })
}

pub fn mcp_servers() -> Value {
    json!({
        "context7": {
            "type": "remote",
            "url": "https://mcp.context7.com/mcp",
            "enabled": true
        }
    })
}

/// Add keys from `source` that `target` lacks, recursing into objects.
pub fn merge_missing(target: &mut Value, source: Value) {
    let (Value::Object(target), Value::Object(source)) = (target, source) else {
        return;
    };
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(existing) if existing.is_object() && value.is_object() => {
                merge_missing(existing, value)
            }
            Some(_) => {}
            None => {
                target.insert(key, value);
            }
        }
    }
}

/// Merge installer settings into `existing` JSONC text (or a fresh config).
pub fn merge(existing: Option<&str>, with_provider: bool) -> Result<String> {
    let mut config = match existing {
        Some(text) if !text.trim().is_empty() => json5::from_str::<Value>(text)?,
        _ => Value::Object(Map::new()),
    };
    if !config.is_object() {
        return Err(InstallerError::InvalidConfig(
            "opencode config must be a JSON object".to_string(),
        ));
    }

    let mut additions = json!({ "$schema": SCHEMA_URL, "mcp": mcp_servers() });
    if with_provider {
        additions["provider"] = bailian_provider();
    }
    merge_missing(&mut config, additions);

    let mut rendered = serde_json::to_string_pretty(&config)?;
    rendered.push('\n');
    Ok(rendered)
}
