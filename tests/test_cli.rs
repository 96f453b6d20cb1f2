use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the caller's HOME, XDG dirs and credentials.
fn octoagents(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("octoagents"));
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env("XDG_DATA_HOME", dir.path().join(".local/share"))
        .env("OCTOAGENTS_NO_UPDATE_CHECK", "1")
        .env_remove("DASHSCOPE_API_KEY")
        .env_remove("OCTOAGENTS_PRESET")
        .env_remove("OCTOAGENTS_PLUGINS")
        .write_stdin("");
    cmd
}

#[test]
fn test_help_output() {
    let dir = TempDir::new().unwrap();
    octoagents(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Install the OctoAgents agent framework"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version_output() {
    let dir = TempDir::new().unwrap();
    octoagents(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("octoagents "));
}

#[test]
fn test_unknown_flag_exits_with_usage_error() {
    let dir = TempDir::new().unwrap();
    octoagents(&dir)
        .arg("--frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--frobnicate"));
}

#[test]
fn test_invalid_scope_value() {
    let dir = TempDir::new().unwrap();
    octoagents(&dir)
        .args(["--scope", "system"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--scope requires"));
}

#[test]
fn test_unknown_plugin_creates_nothing() {
    let dir = TempDir::new().unwrap();
    octoagents(&dir)
        .args(["--scope", "project", "--provider", "free", "--plugins", "unknown-name"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown plugin"))
        .stderr(predicate::str::contains("Run with --help"));

    assert!(!dir.path().join(".opencode").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    octoagents(&dir)
        .args(["--scope", "project", "--provider", "free", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!dir.path().join(".opencode").exists());
    assert!(!dir.path().join("opencode.jsonc").exists());
}

#[test]
fn test_project_install() {
    let dir = TempDir::new().unwrap();
    octoagents(&dir)
        .args(["--scope", "project", "--provider", "free", "--preset", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed preset 'minimal'"));

    let root = dir.path().join(".opencode");
    assert!(root.join("agents/build.md").is_file());
    assert!(root.join("commands/octo-explain.md").is_file());
    assert!(dir.path().join("opencode.jsonc").is_file());
}

#[test]
fn test_global_install_uses_xdg_config_home() {
    let dir = TempDir::new().unwrap();
    octoagents(&dir)
        .args(["--scope", "global", "--provider", "copilot"])
        .assert()
        .success();

    let root = dir.path().join(".config/opencode");
    assert!(root.join("agents/review.md").is_file());
    assert!(root.join("opencode.jsonc").is_file());
}

#[test]
fn test_scope_prompt_defaults_to_project() {
    let dir = TempDir::new().unwrap();
    octoagents(&dir)
        .args(["--provider", "free", "--preset", "minimal"])
        .write_stdin("\n")
        .assert()
        .success();

    assert!(dir.path().join(".opencode/agents/build.md").is_file());
}

#[test]
fn test_project_config_file_selects_preset() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".octoagents.toml"), "preset = \"minimal\"\n").unwrap();

    octoagents(&dir)
        .args(["--scope", "project", "--provider", "free"])
        .assert()
        .success();

    let agents = dir.path().join(".opencode/agents");
    assert!(agents.join("implement.md").is_file());
    assert!(!agents.join("review.md").exists());
}

#[test]
fn test_invalid_permission_in_config_aborts() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".octoagents.toml"),
        "[agents.build.permission]\nedit = \"sometimes\"\n",
    )
    .unwrap();

    octoagents(&dir)
        .args(["--scope", "project", "--provider", "free"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("permission_value"));

    assert!(!dir.path().join(".opencode").exists());
}
