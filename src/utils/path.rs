use std::path::{Path, PathBuf};

/// Expand a leading `~` or `~/` to the current user's home directory.
///
/// Paths without a leading tilde are returned unchanged. `~user` forms are
/// not supported and returned as-is. Returns `None` when the path needs
/// `HOME` and it is unset.
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_str()?;

    let Some(after_tilde) = path_str.strip_prefix('~') else {
        return Some(path.to_path_buf());
    };

    if !after_tilde.is_empty() && !after_tilde.starts_with('/') {
        return Some(path.to_path_buf());
    }

    let home = std::env::var("HOME").ok().filter(|h| !h.is_empty())?;
    Some(PathBuf::from(home).join(after_tilde.trim_start_matches('/')))
}

/// Expand `~` and anchor relative paths at `cwd`.
pub fn resolve_against(path: &Path, cwd: &Path) -> Option<PathBuf> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Some(expanded)
    } else {
        Some(cwd.join(expanded))
    }
}
