//! Install orchestration.
//!
//! One run walks a fixed sequence:
//!
//! 1. resolve the target root
//! 2. resolve preset and content plugins, detect providers
//! 3. resolve a model per role
//! 4. validate names and permissions (nothing is written on failure)
//! 5. optionally clear the previous install
//! 6. create the directory layout
//! 7. render and write agents, commands, skills, context, plugins, tools,
//!    plugin extra files and `opencode.jsonc`
//! 8. return an [`InstallReport`]
//!
//! Failures while rendering or writing a single item are logged and
//! recorded in the report; the run continues with the next item.

pub mod scope;
pub mod writer;

pub use scope::{resolve_target, InstallScope, InstallTarget, ResolvedTarget};
pub use writer::{DryRunWriter, FsWriter, Writer};

use crate::agents::{AgentCustomization, AgentDefinition};
use crate::catalog::{self, CommandDefinition};
use crate::error::{InstallerError, Result};
use crate::models::{self, AgentRole, ModelAssignment, Tier};
use crate::opencode_config;
use crate::plugins::{self, ContentPlugin};
use crate::providers::{self, ProviderAvailability};
use crate::template::{self, TemplateStore};
use crate::utils::HostEnv;
use crate::validate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directories the installer owns under the root.
pub const MANAGED_DIRS: [&str; 6] = ["agents", "commands", "skills", "context", "plugins", "tools"];

const AGENT_TEMPLATE: &str = "agents/agent.md";
const COMMAND_TEMPLATE: &str = "commands/command.md";
const SKILL_TEMPLATE: &str = "skills/SKILL.md";

/// Frozen input for one run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub target: InstallTarget,
    pub preset: String,
    pub clean: bool,
    pub dry_run: bool,
    pub no_overrides: bool,
    pub plugins: Vec<String>,
    /// Skip detection and use this availability.
    pub providers: Option<ProviderAvailability>,
    pub templates: TemplateStore,
    pub customizations: BTreeMap<AgentRole, AgentCustomization>,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            target: InstallTarget::Scope(InstallScope::Project),
            preset: catalog::DEFAULT_PRESET.to_string(),
            clean: false,
            dry_run: false,
            no_overrides: false,
            plugins: plugins::DEFAULT_PLUGINS.iter().map(|s| s.to_string()).collect(),
            providers: None,
            templates: TemplateStore::Embedded,
            customizations: BTreeMap::new(),
        }
    }
}

/// Result of one run. Counts are planned writes in dry-run mode.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub root: PathBuf,
    pub preset: String,
    pub dry_run: bool,
    pub providers: ProviderAvailability,
    pub assignments: Vec<ModelAssignment>,
    pub files_written: usize,
    pub files_skipped: usize,
    pub plugins_applied: Vec<String>,
    pub failures: Vec<String>,
}

impl InstallReport {
    pub fn assignment(&self, role: AgentRole) -> Option<&ModelAssignment> {
        self.assignments.iter().find(|a| a.role == role)
    }
}

/// Tracks counts and per-item failures while writing.
struct Emitter<'a> {
    writer: &'a dyn Writer,
    root: &'a Path,
    written: usize,
    skipped: usize,
    failures: Vec<String>,
}

impl<'a> Emitter<'a> {
    fn new(writer: &'a dyn Writer, root: &'a Path) -> Self {
        Self {
            writer,
            root,
            written: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    fn fail(&mut self, item: &str, error: InstallerError) {
        tracing::warn!("Skipping {}: {}", item, error);
        self.failures.push(format!("{}: {}", item, error));
    }

    /// Write rendered `content` to `relative`, recording any failure.
    fn emit(&mut self, relative: &str, content: Result<String>) {
        let result = content.and_then(|c| self.writer.write(&self.root.join(relative), &c));
        match result {
            Ok(()) => self.written += 1,
            Err(e) => self.fail(relative, e),
        }
    }

    /// Like [`emit`](Self::emit) but leaves an existing file untouched.
    fn emit_if_absent(&mut self, relative: &str, content: impl FnOnce() -> Result<String>) {
        if self.writer.exists(&self.root.join(relative)) {
            tracing::debug!("Keeping existing {}", relative);
            self.skipped += 1;
            return;
        }
        self.emit(relative, content());
    }
}

pub fn render_agent(
    definition: &AgentDefinition,
    store: &TemplateStore,
    plugins: &[ContentPlugin],
) -> Result<String> {
    let template = store.load(AGENT_TEMPLATE)?;
    let rendered = template::render(&template, &definition.template_vars(), AGENT_TEMPLATE)?;
    Ok(plugins::apply_content_plugins(definition.role, &rendered, plugins))
}

pub fn render_command(command: &CommandDefinition, store: &TemplateStore) -> Result<String> {
    let template = store.load(COMMAND_TEMPLATE)?;
    template::render(&template, &command.template_vars(), COMMAND_TEMPLATE)
}

fn render_skill(skill: &catalog::Skill, store: &TemplateStore) -> Result<String> {
    let template = store.load(SKILL_TEMPLATE)?;
    let body = store.load(&skill.body_template())?;
    template::render(&template, &skill.template_vars(&body), SKILL_TEMPLATE)
}

/// Agent definitions for the preset, before prompts are loaded.
fn plan_agents(
    assignments: &[ModelAssignment],
    customizations: &BTreeMap<AgentRole, AgentCustomization>,
) -> Vec<AgentDefinition> {
    assignments
        .iter()
        .map(|assignment| {
            let definition = AgentDefinition::new(assignment, String::new());
            match customizations.get(&assignment.role) {
                Some(custom) => definition.customize(custom),
                None => definition,
            }
        })
        .collect()
}

fn validate_plan(agents: &[AgentDefinition], commands: &[&CommandDefinition]) -> Result<()> {
    let agent_names: Vec<&str> = agents.iter().map(|a| a.name.as_str()).collect();
    let command_names: Vec<&str> = commands.iter().map(|c| c.name).collect();
    let permission_sets: Vec<(&str, &_)> = agents
        .iter()
        .map(|a| (a.name.as_str(), &a.permission))
        .collect();

    let errors = validate::validate(&agent_names, &command_names, &permission_sets);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(InstallerError::Validation(errors))
    }
}

fn merge_opencode_config(
    writer: &dyn Writer,
    path: &Path,
    with_provider: bool,
    emitter: &mut Emitter<'_>,
) {
    let existing = if path.is_file() {
        match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                emitter.fail(&path.display().to_string(), e.into());
                return;
            }
        }
    } else {
        None
    };

    match opencode_config::merge(existing.as_deref(), with_provider) {
        Ok(merged) => match writer.write(path, &merged) {
            Ok(()) => emitter.written += 1,
            Err(e) => emitter.fail(&path.display().to_string(), e),
        },
        Err(e) => {
            tracing::warn!("Leaving {} untouched: {}", path.display(), e);
            emitter.skipped += 1;
        }
    }
}

/// Run one install with the real filesystem, or a dry run when requested.
pub fn install(options: &InstallOptions, env: &HostEnv, cwd: &Path) -> Result<InstallReport> {
    let writer: Box<dyn Writer> = if options.dry_run {
        Box::new(DryRunWriter::default())
    } else {
        Box::new(FsWriter)
    };
    install_with(options, env, cwd, writer.as_ref())
}

/// Run one install through `writer`.
pub fn install_with(
    options: &InstallOptions,
    env: &HostEnv,
    cwd: &Path,
    writer: &dyn Writer,
) -> Result<InstallReport> {
    let target = resolve_target(&options.target, env, cwd)?;
    let preset = catalog::find_preset(&options.preset)?;
    let content_plugins = plugins::resolve_plugins(&options.plugins)?;
    let providers = options
        .providers
        .unwrap_or_else(|| providers::detect(env));

    let assignments = models::resolve_all(&preset.roles_for(options.no_overrides), &providers);
    let mut agents = plan_agents(&assignments, &options.customizations);
    let commands = preset.command_definitions()?;
    validate_plan(&agents, &commands)?;

    tracing::info!(
        "Installing preset '{}' into {} (templates: {})",
        preset.name,
        target.root.display(),
        options.templates.describe()
    );

    if options.clean {
        for dir in MANAGED_DIRS {
            writer.remove_dir_all(&target.root.join(dir))?;
        }
    }
    for dir in MANAGED_DIRS {
        writer.create_dir_all(&target.root.join(dir))?;
    }

    let store = &options.templates;
    let mut emitter = Emitter::new(writer, &target.root);

    for agent in agents.iter_mut() {
        let path = format!("agents/{}.md", agent.name);
        let content = store
            .load(&format!("prompts/{}.md", agent.role))
            .and_then(|prompt| {
                agent.prompt = prompt;
                render_agent(agent, store, &content_plugins)
            });
        emitter.emit(&path, content);
    }

    for command in &commands {
        emitter.emit(
            &format!("commands/{}.md", command.name),
            render_command(command, store),
        );
    }

    for skill in catalog::SKILLS {
        emitter.emit_if_absent(&skill.install_path(), || render_skill(skill, store));
    }

    for file in catalog::CONTEXT_FILES {
        let relative = format!("context/{}", file);
        emitter.emit_if_absent(&relative, || store.load(&relative));
    }

    for file in catalog::RUNTIME_PLUGINS {
        let relative = format!("plugins/{}", file);
        emitter.emit(&relative, store.load(&relative));
    }

    for tool in preset.tools {
        let relative = catalog::tool_path(tool);
        emitter.emit(&relative, store.load(&relative));
    }

    for plugin in &content_plugins {
        for extra in plugin.extra_files() {
            emitter.emit(extra.path, store.load(extra.template));
        }
    }

    let with_provider = assignments.iter().any(|a| a.tier == Tier::Bailian);
    merge_opencode_config(writer, &target.config_file, with_provider, &mut emitter);

    let Emitter {
        written,
        skipped,
        failures,
        ..
    } = emitter;

    Ok(InstallReport {
        root: target.root,
        preset: preset.name.to_string(),
        dry_run: writer.is_dry_run(),
        providers,
        assignments,
        files_written: written,
        files_skipped: skipped,
        plugins_applied: content_plugins.iter().map(|p| p.name().to_string()).collect(),
        failures,
    })
}
