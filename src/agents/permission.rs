//! Permission policies attached to agent frontmatter.
//!
//! Values are kept as raw strings so user-supplied overrides can be
//! validated instead of rejected at parse time. Entries keep insertion
//! order; pattern maps put the catch-all `*` first and more specific
//! patterns after it.

/// Capability names OpenCode recognizes under `permission:`.
pub const PERMISSION_KEYS: [&str; 16] = [
    "read",
    "edit",
    "glob",
    "grep",
    "list",
    "bash",
    "task",
    "skill",
    "lsp",
    "todoread",
    "todowrite",
    "webfetch",
    "websearch",
    "codesearch",
    "external_directory",
    "doom_loop",
];

pub const ALLOW: &str = "allow";
pub const ASK: &str = "ask";
pub const DENY: &str = "deny";

pub fn is_action(value: &str) -> bool {
    matches!(value, ALLOW | ASK | DENY)
}

pub fn is_permission_key(key: &str) -> bool {
    PERMISSION_KEYS.contains(&key)
}

/// Build and test commands agents may run without asking.
pub const SHARED_BASH_ALLOWLIST: &[&str] = &[
    "npm install",
    "npm run build",
    "npm test",
    "npm run test",
    "npm run lint",
    "npm run typecheck",
    "yarn install",
    "yarn build",
    "yarn test",
    "pnpm install",
    "pnpm build",
    "pnpm test",
    "bun install",
    "bun run build",
    "bun test",
    "bun run test",
    "deno task build",
    "deno task test",
    "deno lint",
    "pip install",
    "pytest",
    "python -m pytest",
    "ruff check",
    "cargo build",
    "cargo test",
    "cargo clippy",
    "go build",
    "go test",
    "mvn test",
    "gradle test",
    "./gradlew test",
    "dotnet build",
    "dotnet test",
    "make",
    "make test",
    "swift build",
    "swift test",
    "bundle exec rspec",
    "phpunit",
];

/// Commands that publish, rewrite history or touch shared infrastructure.
pub const SHARED_BASH_DENYLIST: &[&str] = &[
    "git commit",
    "git push",
    "git merge",
    "git rebase",
    "git cherry-pick",
    "git tag",
    "git add",
    "gh pr merge",
    "gh repo create",
    "npm publish",
    "yarn publish",
    "pnpm publish",
    "cargo publish",
    "docker push",
    "kubectl",
    "helm",
    "terraform apply",
    "serverless deploy",
    "sed -i",
    "perl -pi",
];

const TEST_COMMANDS: &[&str] = &[
    "npm test",
    "npm run test",
    "bun test",
    "bun run test",
    "pnpm test",
    "yarn test",
    "pytest",
    "python -m pytest",
    "cargo test",
    "go test",
];

/// One capability's policy: a bare action or an ordered pattern map.
#[derive(Debug, Clone, PartialEq)]
pub enum Permission {
    Action(String),
    Patterns(Vec<(String, String)>),
}

impl Permission {
    pub fn allow() -> Self {
        Permission::Action(ALLOW.to_string())
    }

    pub fn ask() -> Self {
        Permission::Action(ASK.to_string())
    }

    pub fn deny() -> Self {
        Permission::Action(DENY.to_string())
    }

    pub fn patterns<I, P, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, A)>,
        P: Into<String>,
        A: Into<String>,
    {
        Permission::Patterns(
            entries
                .into_iter()
                .map(|(p, a)| (p.into(), a.into()))
                .collect(),
        )
    }
}

/// Ordered `key -> Permission` record for one agent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentPermission {
    entries: Vec<(String, Permission)>,
}

impl AgentPermission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, permission: Permission) -> Self {
        self.set(key, permission);
        self
    }

    /// Insert or replace `key`, keeping the original position on replace.
    pub fn set(&mut self, key: &str, permission: Permission) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = permission,
            None => self.entries.push((key.to_string(), permission)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Permission> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Permission)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Layer `overrides` on top of `self`; a repeated key replaces the whole entry.
    pub fn merge(mut self, overrides: &AgentPermission) -> Self {
        for (key, permission) in overrides.iter() {
            self.set(key, permission.clone());
        }
        self
    }

    /// Render the indented block that follows `permission:` in frontmatter.
    pub fn to_frontmatter(&self) -> String {
        let mut lines = Vec::new();
        for (key, permission) in &self.entries {
            match permission {
                Permission::Action(action) => lines.push(format!("  {}: {}", key, action)),
                Permission::Patterns(patterns) => {
                    lines.push(format!("  {}:", key));
                    for (pattern, action) in patterns {
                        lines.push(format!("    \"{}\": {}", pattern, action));
                    }
                }
            }
        }
        lines.join("\n")
    }
}

fn bash_policy(default: &str, allowlist: &[&str]) -> Permission {
    let mut patterns = vec![("*".to_string(), default.to_string())];
    patterns.extend(
        allowlist
            .iter()
            .map(|cmd| (format!("{}*", cmd), ALLOW.to_string())),
    );
    patterns.extend(
        SHARED_BASH_DENYLIST
            .iter()
            .map(|cmd| (format!("{}*", cmd), DENY.to_string())),
    );
    patterns.push(("rm -rf /*".to_string(), DENY.to_string()));
    patterns.push(("rm -rf ~*".to_string(), DENY.to_string()));
    Permission::Patterns(patterns)
}

fn read_tools() -> AgentPermission {
    AgentPermission::new()
        .with("read", Permission::allow())
        .with("grep", Permission::allow())
        .with("glob", Permission::allow())
        .with("list", Permission::allow())
        .with("lsp", Permission::allow())
}

/// Edit and run anything outside the shared denylist.
pub fn full_access() -> AgentPermission {
    read_tools()
        .with("edit", Permission::allow())
        .with("bash", bash_policy(ALLOW, &[]))
        .with("task", Permission::allow())
        .with("skill", Permission::allow())
        .with("webfetch", Permission::allow())
        .with("websearch", Permission::allow())
        .with("codesearch", Permission::allow())
        .with("todoread", Permission::allow())
        .with("todowrite", Permission::allow())
}

/// Read freely, ask before editing or running unlisted commands.
pub fn read_plan() -> AgentPermission {
    read_tools()
        .with("edit", Permission::ask())
        .with("bash", bash_policy(ASK, SHARED_BASH_ALLOWLIST))
        .with("task", Permission::allow())
        .with("skill", Permission::allow())
        .with("webfetch", Permission::allow())
        .with("websearch", Permission::allow())
        .with("codesearch", Permission::allow())
        .with("todoread", Permission::allow())
        .with("todowrite", Permission::allow())
}

pub fn read_only() -> AgentPermission {
    read_tools()
        .with("webfetch", Permission::allow())
        .with("websearch", Permission::allow())
        .with("codesearch", Permission::allow())
        .with("edit", Permission::deny())
        .with("bash", Permission::deny())
}

/// Edits limited to documentation paths.
pub fn docs_scoped() -> AgentPermission {
    read_tools()
        .with(
            "edit",
            Permission::patterns([("*", ASK), ("*.md", ALLOW), ("docs/**", ALLOW)]),
        )
        .with("bash", Permission::deny())
}

/// Runs known test commands, nothing else.
pub fn test_runner() -> AgentPermission {
    let mut bash = vec![("*".to_string(), DENY.to_string())];
    bash.extend(
        TEST_COMMANDS
            .iter()
            .map(|cmd| (format!("{}*", cmd), ALLOW.to_string())),
    );
    read_tools()
        .with("edit", Permission::deny())
        .with("bash", Permission::Patterns(bash))
}

/// Housekeeping agents only read the conversation they are handed.
pub fn housekeeping() -> AgentPermission {
    AgentPermission::new()
        .with("read", Permission::allow())
        .with("edit", Permission::deny())
        .with("bash", Permission::deny())
        .with("task", Permission::deny())
        .with("webfetch", Permission::deny())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_presets() -> Vec<AgentPermission> {
        vec![
            full_access(),
            read_plan(),
            read_only(),
            docs_scoped(),
            test_runner(),
            housekeeping(),
        ]
    }

    #[test]
    fn test_presets_use_known_keys_and_actions() {
        for preset in all_presets() {
            for (key, permission) in preset.iter() {
                assert!(is_permission_key(key), "unknown key {}", key);
                match permission {
                    Permission::Action(a) => assert!(is_action(a)),
                    Permission::Patterns(p) => {
                        assert!(p.iter().all(|(_, a)| is_action(a)), "bad action in {}", key)
                    }
                }
            }
        }
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut perm = AgentPermission::new()
            .with("read", Permission::allow())
            .with("edit", Permission::allow());
        perm.set("read", Permission::deny());

        let keys: Vec<&str> = perm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["read", "edit"]);
        assert_eq!(perm.get("read"), Some(&Permission::deny()));
    }

    #[test]
    fn test_merge_adds_and_replaces() {
        let overrides = AgentPermission::new()
            .with("bash", Permission::ask())
            .with("doom_loop", Permission::deny());
        let merged = read_only().merge(&overrides);

        assert_eq!(merged.get("bash"), Some(&Permission::ask()));
        assert_eq!(merged.get("doom_loop"), Some(&Permission::deny()));
        assert_eq!(merged.get("read"), Some(&Permission::allow()));
    }

    #[test]
    fn test_full_access_denies_git_push() {
        let Some(Permission::Patterns(bash)) = full_access().get("bash").cloned() else {
            panic!("bash should be a pattern map");
        };
        assert_eq!(bash[0], ("*".to_string(), ALLOW.to_string()));
        assert!(bash.contains(&("git push*".to_string(), DENY.to_string())));
    }

    #[test]
    fn test_frontmatter_rendering() {
        let perm = AgentPermission::new()
            .with("read", Permission::allow())
            .with("edit", Permission::patterns([("*", "ask"), ("docs/**", "allow")]));
        assert_eq!(
            perm.to_frontmatter(),
            "  read: allow\n  edit:\n    \"*\": ask\n    \"docs/**\": allow"
        );
    }
}
