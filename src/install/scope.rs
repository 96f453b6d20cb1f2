//! Where an install lands.

use crate::error::{InstallerError, Result};
use crate::utils::path::resolve_against;
use crate::utils::HostEnv;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallScope {
    /// `./.opencode` in the working directory.
    Project,
    /// `$XDG_CONFIG_HOME/opencode`, falling back to `~/.config/opencode`.
    Global,
}

impl FromStr for InstallScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "project" => Ok(InstallScope::Project),
            "global" => Ok(InstallScope::Global),
            other => Err(format!(
                "--scope requires \"project\" or \"global\", got: {}",
                other
            )),
        }
    }
}

impl fmt::Display for InstallScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallScope::Project => f.write_str("project"),
            InstallScope::Global => f.write_str("global"),
        }
    }
}

/// Either a named scope or an explicit directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallTarget {
    Scope(InstallScope),
    Path(PathBuf),
}

/// Concrete locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Directory holding `agents/`, `commands/`, `skills/` and the rest.
    pub root: PathBuf,
    /// The `opencode.jsonc` merged after agents are written.
    pub config_file: PathBuf,
}

pub fn global_root(env: &HostEnv) -> Result<PathBuf> {
    env.config_home()
        .map(|dir| dir.join("opencode"))
        .ok_or(InstallerError::HomeNotFound)
}

pub fn resolve_target(target: &InstallTarget, env: &HostEnv, cwd: &Path) -> Result<ResolvedTarget> {
    let resolved = match target {
        InstallTarget::Scope(InstallScope::Project) => ResolvedTarget {
            root: cwd.join(".opencode"),
            config_file: cwd.join("opencode.jsonc"),
        },
        InstallTarget::Scope(InstallScope::Global) => {
            let root = global_root(env)?;
            ResolvedTarget {
                config_file: root.join("opencode.jsonc"),
                root,
            }
        }
        InstallTarget::Path(path) => {
            let root = resolve_against(path, cwd).ok_or(InstallerError::HomeNotFound)?;
            ResolvedTarget {
                config_file: root.join("opencode.jsonc"),
                root,
            }
        }
    };
    tracing::debug!("Install root: {}", resolved.root.display());
    Ok(resolved)
}
